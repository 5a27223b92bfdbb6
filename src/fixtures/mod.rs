//! Shared JSON fixtures and SSE body builders for tests.

mod stream_fixtures;

pub use stream_fixtures::*;
