mod driver;
mod registry;
mod session;

pub use driver::{spawn_session, SessionHandle};
pub use registry::{SessionId, SessionRegistry};
pub use session::{SessionState, StreamSession};
