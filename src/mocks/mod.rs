//! Test doubles for the transport seam.

mod mock_source;

pub use mock_source::MockChunkSource;
