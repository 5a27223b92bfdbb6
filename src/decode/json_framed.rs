use crate::decode::{
    classify, split_segments, Classification, ChunkAccumulator, DecodedEvent, DecoderConfig,
    FrameDecoder, Pass, COMPLETION_SENTINEL, DATA_MARKER,
};
use crate::errors::StreamError;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use tracing::{debug, warn};

/// Incremental decoder for SSE-framed JSON event streams.
///
/// Runs exactly one pass per transport chunk: merge with the previous
/// pass's carry-over, split on the `data:` marker, classify each segment
/// in order. At most one fragment is retained between passes, and only
/// when it is the last segment of its pass: a chunk boundary can only
/// truncate the event still being transmitted.
pub struct JsonFramedDecoder<T> {
    accumulator: ChunkAccumulator,
    carry: String,
    config: DecoderConfig,
    _payload: PhantomData<fn() -> T>,
}

impl<T> JsonFramedDecoder<T> {
    pub fn new() -> Self {
        Self::with_config(DecoderConfig::default())
    }

    pub fn with_config(config: DecoderConfig) -> Self {
        Self {
            accumulator: ChunkAccumulator::new(),
            carry: String::new(),
            config,
            _payload: PhantomData,
        }
    }

    /// The fragment currently deferred to the next pass, if any.
    pub fn pending_fragment(&self) -> Option<&str> {
        if self.carry.is_empty() {
            None
        } else {
            Some(&self.carry)
        }
    }
}

impl<T> Default for JsonFramedDecoder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FrameDecoder for JsonFramedDecoder<T>
where
    T: DeserializeOwned + Send + 'static,
{
    type Output = T;

    fn feed(&mut self, chunk: Bytes) -> Pass<T> {
        let mut pass = Pass::default();

        let merged = match self.accumulator.merge(&self.carry, &chunk) {
            Ok(Some(merged)) => merged,
            // Nothing decodes yet; carry stays for the next chunk.
            Ok(None) => return pass,
            Err(e) => {
                self.carry.clear();
                pass.events.push(DecodedEvent::Error(e));
                return pass;
            }
        };
        self.carry.clear();

        let segments = split_segments(&merged);
        if segments.first() == Some(&COMPLETION_SENTINEL) {
            // A bare completion marker ends the pass before any decoding.
            pass.saw_done = true;
            return pass;
        }

        let last_index = segments.len().saturating_sub(1);
        for (index, &segment) in segments.iter().enumerate() {
            match classify::<T>(segment, index == last_index) {
                Classification::Sentinel => pass.saw_done = true,
                Classification::Payload(payload) => {
                    pass.events.push(DecodedEvent::Payload(payload));
                }
                Classification::ApiError(api_error) => {
                    pass.events.push(DecodedEvent::Error(StreamError::Api(api_error)));
                }
                Classification::Fragment => {
                    if segment.len() > self.config.max_carry_bytes {
                        warn!(
                            fragment_len = segment.len(),
                            limit = self.config.max_carry_bytes,
                            "dropping oversized partial fragment"
                        );
                        pass.events.push(DecodedEvent::Error(StreamError::FragmentOverflow {
                            limit: self.config.max_carry_bytes,
                        }));
                    } else {
                        // Re-prefix so the next pass splits it back out.
                        self.carry = format!("{DATA_MARKER} {segment}");
                    }
                }
                Classification::Undecodable(e) => {
                    warn!(error = %e, "segment decodes as neither payload nor API error");
                    pass.events
                        .push(DecodedEvent::Error(StreamError::Deserialization(e.to_string())));
                }
            }
        }

        pass
    }

    fn finish(&mut self) {
        if !self.carry.is_empty() {
            // A final truncated event cannot be completed; the cause is
            // ambiguous, so it is dropped rather than surfaced as an error.
            debug!(
                fragment_len = self.carry.len(),
                "discarding partial fragment at stream end"
            );
            self.carry.clear();
        }
    }
}
