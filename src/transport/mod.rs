mod reqwest_source;

pub use reqwest_source::ReqwestChunkSource;

use crate::errors::SseResult;
use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;

pub type BoxChunkStream = Pin<Box<dyn Stream<Item = SseResult<Bytes>> + Send>>;

/// Delivery side of a streaming session: yields raw byte chunks in arrival
/// order and signals termination by returning `None` (clean close) or an
/// `Err` chunk (transport failure). Connection management, TLS and
/// retry policy all live behind this seam.
#[async_trait]
pub trait ChunkSource: Send {
    async fn next_chunk(&mut self) -> Option<SseResult<Bytes>>;
}

#[async_trait]
impl ChunkSource for BoxChunkStream {
    async fn next_chunk(&mut self) -> Option<SseResult<Bytes>> {
        use futures::StreamExt;
        self.next().await
    }
}
