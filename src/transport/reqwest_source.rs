use crate::errors::{ApiError, SseResult, StreamError};
use crate::transport::{BoxChunkStream, ChunkSource};
use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use reqwest::Response;

/// Adapts an already-sent `reqwest` response into a [`ChunkSource`].
///
/// The HTTP status is checked up front: a non-success response never
/// reaches the decoder. Its body is read once and mapped through the API
/// error envelope so callers see a structured error where the server
/// provided one.
pub struct ReqwestChunkSource {
    inner: BoxChunkStream,
}

impl ReqwestChunkSource {
    pub async fn from_response(response: Response) -> SseResult<Self> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_error_body(status.as_u16(), &body));
        }

        let inner = response
            .bytes_stream()
            .map(|result| result.map_err(StreamError::from))
            .boxed();

        Ok(Self { inner })
    }
}

#[async_trait]
impl ChunkSource for ReqwestChunkSource {
    async fn next_chunk(&mut self) -> Option<SseResult<Bytes>> {
        self.inner.next().await
    }
}

fn map_error_body(status: u16, body: &str) -> StreamError {
    match ApiError::from_json(body) {
        Some(api_error) => StreamError::Api(api_error),
        None => StreamError::Http {
            status,
            message: if body.is_empty() {
                format!("HTTP error: {}", status)
            } else {
                body.to_string()
            },
        },
    }
}
