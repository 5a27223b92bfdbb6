mod api;
mod error;

pub use api::{ApiError, ApiErrorEnvelope};
pub use error::{SseResult, StreamError};
