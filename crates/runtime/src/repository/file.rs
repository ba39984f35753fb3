//! File-based session store.

use std::fs;
use std::path::{Path, PathBuf};

use rpg_core::{Session, SessionId};

use super::{RepositoryError, Result, SessionSnapshot};

/// Stores one JSON snapshot per session as `{session_id}.json`.
///
/// Writes go through a temporary file followed by a rename so a crash never
/// leaves a half-written snapshot behind.
pub struct FileSessionRepository {
    base_dir: PathBuf,
}

impl FileSessionRepository {
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn path(&self, id: &SessionId) -> Result<PathBuf> {
        let valid = !id.is_empty()
            && id
                .as_str()
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'));
        if !valid {
            return Err(RepositoryError::CorruptedData(format!(
                "session id {id:?} cannot be used as a file name"
            )));
        }
        Ok(self.base_dir.join(format!("{id}.json")))
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        let path = self.path(&session.id)?;
        let temp_path = path.with_extension("json.tmp");

        let json = SessionSnapshot::new(session.clone()).to_json()?;
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!("Saved session {} to {}", session.id, path.display());
        Ok(())
    }

    pub fn load(&self, id: &SessionId) -> Result<Option<Session>> {
        let path = self.path(id)?;
        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&path)?;
        let snapshot = SessionSnapshot::from_json(&json)?;

        tracing::debug!("Loaded session {} from {}", id, path.display());
        Ok(Some(snapshot.into_session()))
    }

    pub fn delete(&self, id: &SessionId) -> Result<()> {
        let path = self.path(id)?;
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!("Deleted session {}", id);
        }
        Ok(())
    }

    /// Ids of every stored session, sorted.
    pub fn list(&self) -> Result<Vec<SessionId>> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if let Some(stem) = path
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(|name| name.strip_suffix(".json"))
            {
                ids.push(SessionId::new(stem));
            }
        }
        ids.sort_unstable();
        Ok(ids)
    }
}
