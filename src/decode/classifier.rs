use crate::errors::ApiError;
use serde::de::DeserializeOwned;

/// The literal segment marking the end of event emission for a stream.
pub const COMPLETION_SENTINEL: &str = "[DONE]";

/// Outcome of classifying one candidate event body.
#[derive(Debug)]
pub enum Classification<T> {
    /// The completion sentinel literal.
    Sentinel,
    /// A well-formed payload of the expected result type.
    Payload(T),
    /// A well-formed in-band API error, in either accepted envelope shape.
    ApiError(ApiError),
    /// The segment may be completed by bytes in the next chunk. Only the
    /// last segment of a pass can be classified this way, since a chunk
    /// boundary can only truncate the event still being transmitted.
    Fragment,
    /// A non-terminal segment that decodes as neither payload nor error.
    /// More bytes cannot fix it, so it is a genuine decode error.
    Undecodable(serde_json::Error),
}

pub fn classify<T: DeserializeOwned>(segment: &str, is_last: bool) -> Classification<T> {
    if segment == COMPLETION_SENTINEL {
        return Classification::Sentinel;
    }

    let decode_err = match serde_json::from_str::<T>(segment) {
        Ok(payload) => return Classification::Payload(payload),
        Err(e) => e,
    };

    if let Some(api_error) = ApiError::from_json(segment) {
        return Classification::ApiError(api_error);
    }

    if is_last {
        Classification::Fragment
    } else {
        Classification::Undecodable(decode_err)
    }
}
