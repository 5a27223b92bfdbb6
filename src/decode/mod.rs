mod accumulator;
mod classifier;
mod json_framed;
mod raw;
mod splitter;
mod stream;

pub use accumulator::ChunkAccumulator;
pub use classifier::{classify, Classification, COMPLETION_SENTINEL};
pub use json_framed::JsonFramedDecoder;
pub use raw::RawFrameDecoder;
pub use splitter::{split_segments, DATA_MARKER};
pub use stream::DecodedStream;

use crate::errors::StreamError;
use bytes::Bytes;

/// Event delivered to the consumer of a streaming session.
#[derive(Debug)]
pub enum DecodedEvent<T> {
    Payload(T),
    Error(StreamError),
    /// Terminal signal; carries the transport error when the stream failed.
    Completed(Option<StreamError>),
}

/// Result of one decode pass over one transport chunk.
#[derive(Debug)]
pub struct Pass<T> {
    /// Payload and error events, in classification order. Never contains
    /// `Completed`; terminal signalling belongs to the session.
    pub events: Vec<DecodedEvent<T>>,
    /// Set when the completion sentinel was observed during the pass.
    pub saw_done: bool,
}

impl<T> Default for Pass<T> {
    fn default() -> Self {
        Self {
            events: Vec::new(),
            saw_done: false,
        }
    }
}

/// One decode pass per transport chunk. Implementations are chosen at
/// session construction time: `JsonFramedDecoder` for SSE-framed JSON
/// streams, `RawFrameDecoder` for binary payloads delivered chunk-per-event.
pub trait FrameDecoder: Send {
    type Output: Send + 'static;

    fn feed(&mut self, chunk: Bytes) -> Pass<Self::Output>;

    /// Called when the transport ends. Pending state that can no longer be
    /// completed is discarded here.
    fn finish(&mut self);
}

/// Decoder tuning knobs, in particular the bound that keeps carry-over
/// buffering finite on garbage input.
#[derive(Debug, Clone)]
pub struct DecoderConfig {
    pub max_carry_bytes: usize,
}

impl DecoderConfig {
    pub fn with_max_carry_bytes(mut self, max_carry_bytes: usize) -> Self {
        self.max_carry_bytes = max_carry_bytes;
        self
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_carry_bytes: default_max_carry_bytes(),
        }
    }
}

fn default_max_carry_bytes() -> usize {
    512 * 1024
}
