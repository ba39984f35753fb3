use serde::{Deserialize, Serialize};

use rpg_core::Session;

use super::{RepositoryError, Result};

/// Versioned, self-describing copy of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub version: u32,
    /// Unix milliseconds at which the snapshot was taken.
    pub saved_at: i64,
    pub session: Session,
}

impl SessionSnapshot {
    pub const VERSION: u32 = 1;

    pub fn new(session: Session) -> Self {
        Self {
            version: Self::VERSION,
            saved_at: chrono::Utc::now().timestamp_millis(),
            session,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a snapshot and checks it describes a usable session.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Self = serde_json::from_str(json)?;
        if snapshot.version != Self::VERSION {
            return Err(RepositoryError::UnsupportedVersion {
                found: snapshot.version,
                expected: Self::VERSION,
            });
        }
        if !snapshot.session.invariants_hold() {
            return Err(RepositoryError::CorruptedData(format!(
                "session {} violates its invariants",
                snapshot.session.id
            )));
        }
        Ok(snapshot)
    }

    pub fn into_session(self) -> Session {
        self.session
    }
}
