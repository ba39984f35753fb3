use crate::error::{ErrorSeverity, GameError};
use crate::inventory::InventoryError;
use crate::state::{GamePhase, PlayerId, SessionId};
use crate::story::StoryError;
use crate::world::MoveError;

/// Malformed action strings.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseActionError {
    #[error("empty command")]
    Empty,

    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("missing {0}")]
    MissingArgument(&'static str),

    #[error("unknown direction: {0}")]
    InvalidDirection(String),

    #[error("invalid choice index: {0}")]
    InvalidIndex(String),
}

impl GameError for ParseActionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        "ACTION_MALFORMED"
    }
}

/// Why an action was rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("{0} is not part of this session")]
    NotMember(PlayerId),

    #[error("session {0} is no longer active")]
    Inactive(SessionId),

    #[error("'{action}' is not available during {phase}")]
    NotAllowed { phase: GamePhase, action: String },

    #[error("this area is too dangerous to rest in")]
    UnsafeRest,

    #[error("no fight is in progress")]
    NoCombat,

    #[error(transparent)]
    Move(#[from] MoveError),

    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error(transparent)]
    Story(#[from] StoryError),

    #[error("state invariant violated after {0}")]
    InvariantViolation(String),
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotMember(_) | Self::NotAllowed { .. } | Self::UnsafeRest => {
                ErrorSeverity::Validation
            }
            Self::Inactive(_) => ErrorSeverity::Fatal,
            Self::NoCombat | Self::InvariantViolation(_) => ErrorSeverity::Internal,
            Self::Move(error) => error.severity(),
            Self::Inventory(error) => error.severity(),
            Self::Story(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotMember(_) => "ACTION_NOT_MEMBER",
            Self::Inactive(_) => "ACTION_SESSION_INACTIVE",
            Self::NotAllowed { .. } => "ACTION_NOT_ALLOWED",
            Self::UnsafeRest => "ACTION_UNSAFE_REST",
            Self::NoCombat => "ACTION_NO_COMBAT",
            Self::Move(error) => error.error_code(),
            Self::Inventory(error) => error.error_code(),
            Self::Story(error) => error.error_code(),
            Self::InvariantViolation(_) => "ACTION_INVARIANT_VIOLATION",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_errors_keep_their_codes() {
        let error = ActionError::from(MoveError::NoExit(crate::state::Direction::North));
        assert_eq!(error.error_code(), "MOVE_NO_EXIT");
        assert_eq!(error.severity(), ErrorSeverity::Validation);
    }

    #[test]
    fn inactive_session_is_fatal() {
        let error = ActionError::Inactive("s-1".into());
        assert_eq!(error.severity(), ErrorSeverity::Fatal);
        assert!(!error.severity().is_recoverable());
        assert!(error.severity().is_internal());
    }
}
