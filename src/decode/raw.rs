use crate::decode::{DecodedEvent, FrameDecoder, Pass};
use bytes::Bytes;

/// Decoder variant for binary streaming payloads (speech audio and the
/// like) that are not SSE-framed. Each transport chunk is already a
/// complete unit, so there is no splitting, no classification and no
/// fragment carry: every chunk becomes one payload event.
#[derive(Debug, Default)]
pub struct RawFrameDecoder;

impl RawFrameDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl FrameDecoder for RawFrameDecoder {
    type Output = Bytes;

    fn feed(&mut self, chunk: Bytes) -> Pass<Bytes> {
        Pass {
            events: vec![DecodedEvent::Payload(chunk)],
            saw_done: false,
        }
    }

    fn finish(&mut self) {}
}
