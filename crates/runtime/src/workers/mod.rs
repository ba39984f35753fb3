//! Worker tasks that back the runtime orchestration.
//!
//! Each session is owned by one [`SessionWorker`]; the mpsc queue in front of
//! it guarantees at most one action is in flight per session.

mod session;

pub use session::{Command, SessionWorker};
