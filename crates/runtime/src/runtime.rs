//! High-level runtime orchestrator.
//!
//! The runtime owns one worker per session, wires up command/event channels,
//! and exposes a builder-based API for hosts. Sessions never share state; the
//! only thing they have in common is the event bus.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{RwLock, broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::info;

use rpg_content::FallbackContent;
use rpg_core::{ContentOracle, Difficulty, Effect, GameConfig, PlayerId, Session, SessionId};

use crate::api::{Result, RuntimeError, SessionHandle};
use crate::content::{ContentGateway, ContentGenerator, OfflineGenerator};
use crate::engine::{GameEngine, GameStart};
use crate::events::{Event, EventBus, Topic};
use crate::workers::{Command, SessionWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    /// Upper bound on every content generator call.
    pub content_timeout: Duration,
    pub command_buffer_size: usize,
    pub event_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            content_timeout: Duration::from_secs(5),
            command_buffer_size: 32,
            event_buffer_size: 100,
        }
    }
}

/// A session that was just started, with the effects announcing it.
pub struct SessionStart {
    pub handle: SessionHandle,
    pub effects: Vec<Effect>,
}

struct SessionEntry {
    handle: SessionHandle,
    worker: JoinHandle<()>,
}

/// Registry of independent game sessions.
pub struct Runtime {
    config: RuntimeConfig,
    engine: GameEngine,
    event_bus: EventBus,
    sessions: RwLock<HashMap<SessionId, SessionEntry>>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Subscribe to events of every session on `topic`.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Starts a new game with a random seed.
    pub async fn start_session(
        &self,
        host: PlayerId,
        session_id: SessionId,
        difficulty: Option<Difficulty>,
    ) -> Result<SessionStart> {
        self.start_session_seeded(host, session_id, difficulty, rand::random())
            .await
    }

    /// Starts a new game whose rolls all derive from `seed`.
    pub async fn start_session_seeded(
        &self,
        host: PlayerId,
        session_id: SessionId,
        difficulty: Option<Difficulty>,
        seed: u64,
    ) -> Result<SessionStart> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&session_id) {
            return Err(RuntimeError::SessionExists(session_id));
        }

        let GameStart { session, effects } =
            self.engine.start_game_seeded(host, session_id, difficulty, seed);
        let handle = self.spawn(&mut sessions, session, effects.clone());
        Ok(SessionStart { handle, effects })
    }

    /// Hands a previously saved session to a new worker.
    pub async fn resume_session(&self, session: Session) -> Result<SessionHandle> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&session.id) {
            return Err(RuntimeError::SessionExists(session.id));
        }

        let effects = if session.is_active {
            vec![Effect::ScheduleTimeout {
                after_ms: session.settings.idle_timeout_ms,
            }]
        } else {
            Vec::new()
        };
        info!(session = %session.id, phase = %session.phase, "session resumed");
        Ok(self.spawn(&mut sessions, session, effects))
    }

    pub async fn session(&self, id: &SessionId) -> Option<SessionHandle> {
        self.sessions
            .read()
            .await
            .get(id)
            .map(|entry| entry.handle.clone())
    }

    pub async fn session_ids(&self) -> Vec<SessionId> {
        let mut ids: Vec<_> = self.sessions.read().await.keys().cloned().collect();
        ids.sort_unstable();
        ids
    }

    /// Stops the session's worker and returns its final state.
    ///
    /// Handles still held elsewhere report [`RuntimeError::CommandChannelClosed`]
    /// afterwards.
    pub async fn end_session(&self, id: &SessionId) -> Result<Session> {
        let entry = self
            .sessions
            .write()
            .await
            .remove(id)
            .ok_or_else(|| RuntimeError::UnknownSession(id.clone()))?;
        Self::stop(entry).await
    }

    /// Stops every worker.
    pub async fn shutdown(self) -> Result<()> {
        let sessions = self.sessions.into_inner();
        info!(count = sessions.len(), "shutting down runtime");
        for (_, entry) in sessions {
            Self::stop(entry).await?;
        }
        Ok(())
    }

    fn spawn(
        &self,
        sessions: &mut HashMap<SessionId, SessionEntry>,
        session: Session,
        effects: Vec<Effect>,
    ) -> SessionHandle {
        let (command_tx, command_rx) = mpsc::channel(self.config.command_buffer_size.max(1));
        let handle = SessionHandle::new(
            session.id.clone(),
            session.host.clone(),
            command_tx.clone(),
            self.event_bus.clone(),
        );

        let id = session.id.clone();
        let worker = SessionWorker::new(
            session,
            self.engine.clone(),
            command_rx,
            command_tx.downgrade(),
            self.event_bus.clone(),
        );
        let worker = tokio::spawn(async move {
            worker.run(effects).await;
        });

        sessions.insert(
            id,
            SessionEntry {
                handle: handle.clone(),
                worker,
            },
        );
        handle
    }

    async fn stop(entry: SessionEntry) -> Result<Session> {
        let (reply_tx, reply_rx) = tokio::sync::oneshot::channel();
        entry
            .handle
            .command_tx()
            .send(Command::Shutdown { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;
        let session = reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?;

        entry.worker.await.map_err(RuntimeError::WorkerJoin)?;
        Ok(session)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    generator: Option<Arc<dyn ContentGenerator>>,
    fallback: Option<Arc<dyn ContentOracle>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            generator: None,
            fallback: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Content source consulted first. Without one every request is served
    /// by the fallback.
    pub fn generator(mut self, generator: impl ContentGenerator + 'static) -> Self {
        self.generator = Some(Arc::new(generator));
        self
    }

    /// Deterministic content used when the generator fails; defaults to
    /// [`FallbackContent`].
    pub fn fallback(mut self, fallback: impl ContentOracle + 'static) -> Self {
        self.fallback = Some(Arc::new(fallback));
        self
    }

    /// Build the runtime
    pub fn build(self) -> Runtime {
        let generator = self
            .generator
            .unwrap_or_else(|| Arc::new(OfflineGenerator));
        let fallback = self
            .fallback
            .unwrap_or_else(|| Arc::new(FallbackContent::new()));

        let gateway = ContentGateway::new(generator, fallback, self.config.content_timeout);
        let engine = GameEngine::new(gateway, self.config.game_config.clone());

        Runtime {
            event_bus: EventBus::with_capacity(self.config.event_buffer_size),
            engine,
            config: self.config,
            sessions: RwLock::new(HashMap::new()),
        }
    }
}
