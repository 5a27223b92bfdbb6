use crate::decode::{DecodedEvent, FrameDecoder};
use crate::session::registry::{SessionId, SessionRegistry};
use crate::session::StreamSession;
use crate::transport::ChunkSource;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};
use tokio::sync::{mpsc, oneshot};
use tokio::task::AbortHandle;
use tracing::debug;

/// Cancellation handle for a driven session. Cloneable; cancellation is
/// idempotent across clones.
#[derive(Clone)]
pub struct SessionHandle {
    id: SessionId,
    cancelled: Arc<AtomicBool>,
    abort: Option<AbortHandle>,
    // Weak so that handles stored inside the registry do not keep it alive.
    registry: Weak<Mutex<HashMap<SessionId, SessionHandle>>>,
}

impl SessionHandle {
    pub(crate) fn new(
        id: SessionId,
        abort: AbortHandle,
        registry: Weak<Mutex<HashMap<SessionId, SessionHandle>>>,
    ) -> Self {
        Self {
            id,
            cancelled: Arc::new(AtomicBool::new(false)),
            abort: Some(abort),
            registry,
        }
    }

    /// A handle with no driving task behind it. Registry tests use this.
    #[cfg(test)]
    pub(crate) fn detached(id: SessionId) -> Self {
        Self {
            id,
            cancelled: Arc::new(AtomicBool::new(false)),
            abort: None,
            registry: Weak::new(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Aborts the drive task, which drops the chunk source and with it the
    /// underlying connection. No further events are emitted. Idempotent,
    /// including after the session already reached a terminal state.
    pub fn cancel(&self) {
        if self.cancelled.swap(true, Ordering::SeqCst) {
            return;
        }
        debug!(session_id = self.id, "cancelling streaming session");
        if let Some(abort) = &self.abort {
            abort.abort();
        }
        if let Some(registry) = self.registry.upgrade() {
            let mut sessions = registry.lock().expect("session registry poisoned");
            sessions.remove(&self.id);
        }
    }
}

/// Drives a chunk source into a fresh session on a tokio task, registering
/// it for collective cancellation. Returns the cancellation handle and the
/// consumer's event receiver.
pub fn spawn_session<S, D>(
    mut source: S,
    decoder: D,
    registry: &SessionRegistry,
) -> (SessionHandle, mpsc::UnboundedReceiver<DecodedEvent<D::Output>>)
where
    S: ChunkSource + 'static,
    D: FrameDecoder + 'static,
{
    let (mut session, receiver) = StreamSession::new(decoder);
    let id = registry.allocate_id();
    let (registered_tx, registered_rx) = oneshot::channel::<()>();

    let task_registry = registry.clone();
    let task = tokio::spawn(async move {
        // Hold the first poll until the handle is in the registry, so the
        // deregistration below cannot race the insert.
        let _ = registered_rx.await;
        session.start();
        loop {
            match source.next_chunk().await {
                Some(Ok(chunk)) => {
                    session.on_bytes(chunk);
                    // The consumer may have hung up mid-stream; dropping
                    // the source here closes the underlying connection
                    // instead of draining bytes nobody will see.
                    if session.state().is_terminal() {
                        break;
                    }
                }
                Some(Err(e)) => {
                    session.on_transport_complete(Some(e));
                    break;
                }
                None => {
                    session.on_transport_complete(None);
                    break;
                }
            }
        }
        task_registry.remove(id);
    });

    let handle = SessionHandle::new(id, task.abort_handle(), registry.weak_inner());
    registry.insert(handle.clone());
    let _ = registered_tx.send(());
    (handle, receiver)
}
