//! Cloneable façade for issuing commands to one session.
//!
//! [`SessionHandle`] hides the channel plumbing of the session worker. Every
//! clone feeds the same command queue, so actions from different callers are
//! applied one at a time in arrival order.
use tokio::sync::{broadcast, mpsc, oneshot};

use rpg_core::{Action, ActionOutcome, PlayerId, Session, SessionId};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to a running session.
#[derive(Clone)]
pub struct SessionHandle {
    id: SessionId,
    host: PlayerId,
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl SessionHandle {
    pub(crate) fn new(
        id: SessionId,
        host: PlayerId,
        command_tx: mpsc::Sender<Command>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            id,
            host,
            command_tx,
            event_bus,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn host(&self) -> &PlayerId {
        &self.host
    }

    pub(crate) fn command_tx(&self) -> &mpsc::Sender<Command> {
        &self.command_tx
    }

    /// Submits an action and waits for the worker to apply it.
    pub async fn submit(&self, action: Action) -> Result<ActionOutcome> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Submit {
                action,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Parses a chat command (`"move:north"`, `"attack"`, ...) as the host
    /// and submits it.
    pub async fn act(&self, input: &str) -> Result<ActionOutcome> {
        let action = Action::parse(self.host.clone(), input)?;
        self.submit(action).await
    }

    /// Read-only copy of the current session.
    pub async fn snapshot(&self) -> Result<Session> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Snapshot { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Action strings the host may submit right now.
    pub async fn available_actions(&self) -> Result<Vec<String>> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::AvailableActions { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Subscribe to events from a specific topic.
    ///
    /// The bus is shared by every session of the runtime; filter on the
    /// event's session id to follow only this one.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }
}
