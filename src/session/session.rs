use crate::decode::{DecodedEvent, FrameDecoder};
use crate::errors::StreamError;
use bytes::Bytes;
use tokio::sync::mpsc;
use tracing::debug;

/// Lifecycle of one streaming session. Terminal states are absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Streaming,
    Completed,
    Failed,
    Cancelled,
}

impl SessionState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SessionState::Completed | SessionState::Failed | SessionState::Cancelled
        )
    }
}

/// One logical stream: owns the decoder (and with it the carry-over
/// buffer) and the consumer-facing event channel. Every decoded event is
/// pushed onto a single-consumer channel in classification order, never
/// batched.
pub struct StreamSession<D: FrameDecoder> {
    state: SessionState,
    decoder: D,
    events: mpsc::UnboundedSender<DecodedEvent<D::Output>>,
    received_any_bytes: bool,
}

impl<D: FrameDecoder> StreamSession<D> {
    pub fn new(decoder: D) -> (Self, mpsc::UnboundedReceiver<DecodedEvent<D::Output>>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let session = Self {
            state: SessionState::Idle,
            decoder,
            events,
            received_any_bytes: false,
        };
        (session, receiver)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Transport connection opened: `Idle -> Streaming`.
    pub fn start(&mut self) {
        if self.state == SessionState::Idle {
            self.state = SessionState::Streaming;
        }
    }

    /// Runs one decode pass over a delivered chunk and forwards its events.
    /// Chunks delivered outside `Streaming` (after cancellation or a
    /// terminal signal) are ignored.
    pub fn on_bytes(&mut self, chunk: Bytes) {
        if self.state != SessionState::Streaming {
            return;
        }
        if !chunk.is_empty() {
            self.received_any_bytes = true;
        }

        let pass = self.decoder.feed(chunk);
        for event in pass.events {
            if self.events.send(event).is_err() {
                // Consumer hung up; nothing left to deliver to.
                debug!("event receiver dropped, cancelling session");
                self.state = SessionState::Cancelled;
                return;
            }
        }
    }

    /// Terminal signal from the transport: `Streaming -> Completed` on a
    /// clean close, `Streaming -> Failed` when the transport reports an
    /// error. Any pending fragment is discarded by the decoder.
    pub fn on_transport_complete(&mut self, error: Option<StreamError>) {
        if self.state.is_terminal() {
            return;
        }
        self.decoder.finish();

        let error = match error {
            Some(e) => {
                self.state = SessionState::Failed;
                Some(e)
            }
            None if !self.received_any_bytes => {
                // A clean close before any byte arrived: at least the
                // completion marker was expected.
                self.state = SessionState::Completed;
                Some(StreamError::EmptyContent)
            }
            None => {
                self.state = SessionState::Completed;
                None
            }
        };

        debug!(state = ?self.state, "streaming session finished");
        let _ = self.events.send(DecodedEvent::Completed(error));
    }

    /// Cooperative cancellation: flips to `Cancelled` and emits nothing.
    /// Idempotent, including after a terminal state.
    pub fn cancel(&mut self) {
        if !self.state.is_terminal() {
            self.state = SessionState::Cancelled;
        }
    }
}
