//! Event types for different topics.

use serde::{Deserialize, Serialize};

use rpg_core::{Action, Effect, EndReason, GamePhase, SessionId};

/// Result of one processed action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionEvent {
    pub session: SessionId,
    pub action: Action,
    pub success: bool,
    pub phase: GamePhase,
    pub message: Option<String>,
    pub error_code: Option<String>,
    pub effects: Vec<Effect>,
}

/// Session creation and teardown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LifecycleEvent {
    Started { session: SessionId },
    Ended { session: SessionId, reason: EndReason },
    /// The worker stopped; no further events follow for this session.
    Closed { session: SessionId },
}
