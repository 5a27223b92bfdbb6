use crate::errors::{SseResult, StreamError};
use crate::transport::ChunkSource;
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::VecDeque;

/// Scripted chunk source: replays configured chunks in order, then
/// reports a clean close (or hangs forever, for cancellation tests).
pub struct MockChunkSource {
    chunks: VecDeque<SseResult<Bytes>>,
    pending_forever: bool,
}

impl MockChunkSource {
    pub fn new() -> Self {
        Self {
            chunks: VecDeque::new(),
            pending_forever: false,
        }
    }

    /// A source that never yields and never closes.
    pub fn pending_forever() -> Self {
        Self {
            chunks: VecDeque::new(),
            pending_forever: true,
        }
    }

    pub fn with_chunk(mut self, text: &str) -> Self {
        self.chunks
            .push_back(Ok(Bytes::copy_from_slice(text.as_bytes())));
        self
    }

    pub fn with_bytes(mut self, bytes: Bytes) -> Self {
        self.chunks.push_back(Ok(bytes));
        self
    }

    pub fn with_error(mut self, error: StreamError) -> Self {
        self.chunks.push_back(Err(error));
        self
    }
}

impl Default for MockChunkSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChunkSource for MockChunkSource {
    async fn next_chunk(&mut self) -> Option<SseResult<Bytes>> {
        match self.chunks.pop_front() {
            Some(item) => Some(item),
            None if self.pending_forever => {
                std::future::pending::<()>().await;
                unreachable!()
            }
            None => None,
        }
    }
}
