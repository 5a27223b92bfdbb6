use crate::session::SessionHandle;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};
use tracing::debug;

pub type SessionId = u64;

/// Registry of live streaming sessions, kept so a caller can track and
/// cancel all outstanding streams collectively. Sessions deregister
/// themselves on completion, concurrently with new registrations, so the
/// map is lock-protected. Created with the owning client and torn down
/// with it; there is no process-wide instance.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    inner: Arc<Mutex<HashMap<SessionId, SessionHandle>>>,
    next_id: Arc<AtomicU64>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate_id(&self) -> SessionId {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    pub(crate) fn weak_inner(&self) -> Weak<Mutex<HashMap<SessionId, SessionHandle>>> {
        Arc::downgrade(&self.inner)
    }

    pub fn insert(&self, handle: SessionHandle) {
        let mut sessions = self.inner.lock().expect("session registry poisoned");
        sessions.insert(handle.id(), handle);
    }

    pub fn remove(&self, id: SessionId) {
        let mut sessions = self.inner.lock().expect("session registry poisoned");
        sessions.remove(&id);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("session registry poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cancels every live session and clears the registry.
    pub fn cancel_all(&self) {
        let handles: Vec<SessionHandle> = {
            let mut sessions = self.inner.lock().expect("session registry poisoned");
            sessions.drain().map(|(_, handle)| handle).collect()
        };
        debug!(count = handles.len(), "cancelling all live sessions");
        for handle in handles {
            handle.cancel();
        }
    }
}
