//! Session persistence helpers.
//!
//! The engine itself never persists anything; hosts that want to keep a game
//! across restarts store [`SessionSnapshot`]s, either themselves (via
//! [`SessionSnapshot::to_json`]) or with the [`FileSessionRepository`].

mod error;
mod file;
mod snapshot;

pub use error::{RepositoryError, Result};
pub use file::FileSessionRepository;
pub use snapshot::SessionSnapshot;
