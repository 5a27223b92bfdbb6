//! End-to-end streaming tests against a local mock HTTP server.

use futures::StreamExt;
use openai_sse::decode::{DecodedEvent, DecodedStream, JsonFramedDecoder};
use openai_sse::errors::StreamError;
use openai_sse::session::{spawn_session, SessionRegistry};
use openai_sse::transport::ReqwestChunkSource;
use serde::Deserialize;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Deserialize, PartialEq)]
struct CompletionChunk {
    id: String,
    #[serde(default)]
    content: Option<String>,
}

fn sse_body(events: &[&str]) -> String {
    let mut body = String::new();
    for event in events {
        body.push_str(&format!("data: {}\n\n", event));
    }
    body.push_str("data: [DONE]\n\n");
    body
}

async fn mount_stream(server: &MockServer, body: String) {
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .mount(server)
        .await;
}

async fn send_request(server: &MockServer) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{}/v1/chat/completions", server.uri()))
        .send()
        .await
        .expect("request failed")
}

#[tokio::test]
async fn test_session_decodes_a_full_stream() {
    let server = MockServer::start().await;
    mount_stream(
        &server,
        sse_body(&[
            r#"{"id":"chatcmpl-1","content":"Hello"}"#,
            r#"{"id":"chatcmpl-1","content":" there"}"#,
        ]),
    )
    .await;

    let response = send_request(&server).await;
    let source = ReqwestChunkSource::from_response(response)
        .await
        .expect("status check failed");

    let registry = SessionRegistry::new();
    let (_handle, mut rx) = spawn_session(
        source,
        JsonFramedDecoder::<CompletionChunk>::new(),
        &registry,
    );

    let mut contents = Vec::new();
    let mut completed = false;
    while let Some(event) = rx.recv().await {
        match event {
            DecodedEvent::Payload(chunk) => contents.push(chunk.content.unwrap_or_default()),
            DecodedEvent::Completed(None) => completed = true,
            other => panic!("unexpected event: {:?}", other),
        }
    }

    assert_eq!(contents, vec!["Hello", " there"]);
    assert!(completed);
    assert!(registry.is_empty());
}

#[tokio::test]
async fn test_decoded_stream_over_response_bytes() {
    let server = MockServer::start().await;
    mount_stream(
        &server,
        sse_body(&[r#"{"id":"a"}"#, r#"{"id":"b"}"#]),
    )
    .await;

    let response = send_request(&server).await;
    let bytes = response
        .bytes_stream()
        .map(|r| r.map_err(StreamError::from));

    let stream = DecodedStream::new(bytes, JsonFramedDecoder::<CompletionChunk>::new());
    let ids: Vec<String> = stream
        .map(|item| item.expect("decode failed").id)
        .collect()
        .await;

    assert_eq!(ids, vec!["a", "b"]);
}

#[tokio::test]
async fn test_in_band_api_error_is_structured() {
    let server = MockServer::start().await;
    mount_stream(
        &server,
        sse_body(&[r#"{"error":{"message":"The server is overloaded","type":"server_error"}}"#]),
    )
    .await;

    let response = send_request(&server).await;
    let source = ReqwestChunkSource::from_response(response).await.unwrap();

    let registry = SessionRegistry::new();
    let (_handle, mut rx) = spawn_session(
        source,
        JsonFramedDecoder::<CompletionChunk>::new(),
        &registry,
    );

    match rx.recv().await.unwrap() {
        DecodedEvent::Error(StreamError::Api(error)) => {
            assert_eq!(error.message, "The server is overloaded");
        }
        other => panic!("expected structured api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_error_status_never_reaches_the_decoder() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_raw(
            r#"{"error":{"message":"Incorrect API key","type":"invalid_request_error"}}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let response = send_request(&server).await;
    let result = ReqwestChunkSource::from_response(response).await;

    match result {
        Err(StreamError::Api(error)) => assert_eq!(error.message, "Incorrect API key"),
        other => panic!("expected api error, got {:?}", other.err()),
    }
}

#[tokio::test]
async fn test_stream_without_done_completes_cleanly() {
    let server = MockServer::start().await;
    // Transport close without the sentinel; the trailing fragment is
    // dropped silently.
    mount_stream(
        &server,
        "data: {\"id\":\"a\"}\n\ndata: {\"trunc".to_string(),
    )
    .await;

    let response = send_request(&server).await;
    let source = ReqwestChunkSource::from_response(response).await.unwrap();

    let registry = SessionRegistry::new();
    let (_handle, mut rx) = spawn_session(
        source,
        JsonFramedDecoder::<CompletionChunk>::new(),
        &registry,
    );

    match rx.recv().await.unwrap() {
        DecodedEvent::Payload(chunk) => assert_eq!(chunk.id, "a"),
        other => panic!("expected payload, got {:?}", other),
    }
    assert!(matches!(
        rx.recv().await.unwrap(),
        DecodedEvent::Completed(None)
    ));
    assert!(rx.recv().await.is_none());
}
