//! SSE stream fixtures

use serde::Deserialize;
use serde_json::json;

/// Minimal completion-chunk shape used as the expected result type in
/// decoder tests.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CompletionChunk {
    pub id: String,
    #[serde(default)]
    pub content: Option<String>,
}

/// Sample streamed completion chunk.
pub fn completion_chunk(id: &str, content: &str) -> serde_json::Value {
    json!({
        "id": id,
        "content": content,
    })
}

/// API error in the nested envelope shape.
pub fn api_error_envelope(message: &str) -> serde_json::Value {
    json!({
        "error": {
            "message": message,
            "type": "server_error",
            "param": null,
            "code": null,
        }
    })
}

/// Frames one JSON value as a single SSE event.
pub fn sse_event(value: &serde_json::Value) -> String {
    format!("data: {}\n\n", value)
}

/// Builds a complete SSE body: each value framed as an event, followed by
/// the completion sentinel.
pub fn sse_body(values: &[serde_json::Value]) -> String {
    let mut body = String::new();
    for value in values {
        body.push_str(&sse_event(value));
    }
    body.push_str("data: [DONE]\n\n");
    body
}
