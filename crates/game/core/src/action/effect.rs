use crate::error::GameError;
use crate::state::{EndReason, Session};

use super::SystemAction;

/// Caller-visible side effect of a transition. The engine never performs
/// these itself.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Effect {
    SendMessage { text: String },
    EndGame { reason: EndReason },
    /// (Re)arm the idle timer; submit [`SystemAction::IdleTimeout`] when it fires.
    ScheduleTimeout { after_ms: u64 },
    /// Submit `action` after `delay_ms`.
    ScheduleFollowUp { action: SystemAction, delay_ms: u64 },
}

impl Effect {
    pub fn message(text: impl Into<String>) -> Self {
        Self::SendMessage { text: text.into() }
    }
}

/// Result of processing one action.
///
/// On failure `session` is an untouched copy of the input and `effects` is
/// empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionOutcome {
    pub session: Session,
    pub effects: Vec<Effect>,
    pub success: bool,
    pub message: Option<String>,
    /// Stable code of the rejection, when `success` is false.
    pub error_code: Option<&'static str>,
}

impl ActionOutcome {
    pub fn applied(session: Session, effects: Vec<Effect>, message: Option<String>) -> Self {
        Self {
            session,
            effects,
            success: true,
            message,
            error_code: None,
        }
    }

    pub fn rejected<E: GameError>(session: Session, error: &E) -> Self {
        Self {
            session,
            effects: Vec::new(),
            success: false,
            message: Some(error.to_string()),
            error_code: Some(error.error_code()),
        }
    }

    /// Text of every message effect, in order.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.effects.iter().filter_map(|effect| match effect {
            Effect::SendMessage { text } => Some(text.as_str()),
            _ => None,
        })
    }
}
