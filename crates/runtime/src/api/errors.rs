//! Unified error types surfaced by the runtime API.
//!
//! Rule violations never show up here; they come back as unsuccessful
//! [`rpg_core::ActionOutcome`]s. These errors cover registry misuse and
//! worker coordination.
use thiserror::Error;
use tokio::sync::oneshot;

use rpg_core::{ParseActionError, SessionId};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("session {0} already exists")]
    SessionExists(SessionId),

    #[error("session {0} not found")]
    UnknownSession(SessionId),

    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("session worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Parse(#[from] ParseActionError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
