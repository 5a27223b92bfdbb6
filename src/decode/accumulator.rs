use crate::errors::StreamError;

/// Merges raw transport chunks with the previous pass's carry-over text.
///
/// UTF-8 decoding happens here because a chunk boundary can fall inside a
/// multi-byte sequence. The incomplete tail is retained at the byte level
/// and prepended to the next chunk instead of being surfaced as an error.
#[derive(Debug, Default)]
pub struct ChunkAccumulator {
    pending: Vec<u8>,
}

impl ChunkAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes currently held back waiting for the rest of a split sequence.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Appends `chunk` to the pending tail and decodes as much of it as is
    /// valid UTF-8. Returns `Ok(None)` when nothing decodes yet
    /// (insufficient data), otherwise `carry` concatenated with the decoded
    /// text. Invalid byte sequences that are not a boundary split drop the
    /// pending tail and fail with `UnknownContent`.
    pub fn merge(&mut self, carry: &str, chunk: &[u8]) -> Result<Option<String>, StreamError> {
        self.pending.extend_from_slice(chunk);

        let valid_up_to = match std::str::from_utf8(&self.pending) {
            Ok(_) => self.pending.len(),
            Err(e) if e.error_len().is_none() => e.valid_up_to(),
            Err(_) => {
                self.pending.clear();
                return Err(StreamError::UnknownContent);
            }
        };

        if valid_up_to == 0 {
            return Ok(None);
        }

        let tail = self.pending.split_off(valid_up_to);
        let head = std::mem::replace(&mut self.pending, tail);
        let text = String::from_utf8(head).map_err(|_| StreamError::UnknownContent)?;

        let mut merged = String::with_capacity(carry.len() + text.len());
        merged.push_str(carry);
        merged.push_str(&text);
        Ok(Some(merged))
    }
}
