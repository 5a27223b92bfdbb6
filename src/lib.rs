//! Incremental SSE decoder for OpenAI-style streaming completion
//! endpoints.
//!
//! The decoder turns a raw, chunked HTTP byte stream into a sequence of
//! typed events delivered in real time: network chunking is not aligned
//! with logical event boundaries, so each pass merges the previous
//! chunk's unconsumed tail, splits on the SSE `data:` marker, and
//! classifies every segment as a payload, an in-band API error, the
//! `[DONE]` sentinel, or a partial fragment deferred to the next pass.
//!
//! Two consumption surfaces are provided: [`decode::DecodedStream`], a
//! `futures::Stream` adapter over any byte stream, and
//! [`session::spawn_session`], which drives a [`transport::ChunkSource`]
//! on a tokio task and delivers events over a channel with cooperative
//! cancellation and a registry for bulk shutdown.

pub mod decode;
pub mod errors;
pub mod session;
pub mod transport;

#[cfg(test)]
pub mod fixtures;
#[cfg(test)]
pub mod mocks;

pub use decode::{
    DecodedEvent, DecodedStream, DecoderConfig, FrameDecoder, JsonFramedDecoder, RawFrameDecoder,
};
pub use errors::{ApiError, SseResult, StreamError};
pub use session::{spawn_session, SessionHandle, SessionRegistry, SessionState, StreamSession};
pub use transport::{ChunkSource, ReqwestChunkSource};

pub mod prelude {
    pub use crate::decode::{DecodedEvent, DecodedStream, JsonFramedDecoder, RawFrameDecoder};
    pub use crate::errors::{ApiError, SseResult, StreamError};
    pub use crate::session::{spawn_session, SessionRegistry};
    pub use crate::transport::{ChunkSource, ReqwestChunkSource};
}
