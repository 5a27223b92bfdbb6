use crate::errors::ApiError;
use thiserror::Error;

pub type SseResult<T> = Result<T, StreamError>;

#[derive(Error, Debug, Clone)]
pub enum StreamError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("HTTP error: {status} - {message}")]
    Http { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Unknown content: segment is not valid UTF-8 text")]
    UnknownContent,

    #[error("Empty content: stream ended before any bytes were received")]
    EmptyContent,

    #[error("Fragment overflow: retained fragment exceeded {limit} bytes")]
    FragmentOverflow { limit: usize },
}

impl StreamError {
    /// True for errors carried in-band by a well-formed API error payload,
    /// as opposed to local decode or transport failures.
    pub fn is_api_error(&self) -> bool {
        matches!(self, StreamError::Api(_))
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            StreamError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for StreamError {
    fn from(err: reqwest::Error) -> Self {
        StreamError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for StreamError {
    fn from(err: serde_json::Error) -> Self {
        StreamError::Deserialization(err.to_string())
    }
}
