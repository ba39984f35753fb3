//! Session worker that owns the authoritative [`rpg_core::Session`].
//!
//! Receives commands from [`SessionHandle`](crate::api::SessionHandle), runs
//! them through the [`GameEngine`], carries out the timer effects, and
//! publishes events to the EventBus.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use rpg_core::{Action, ActionOutcome, Effect, Session, SystemAction};

use crate::engine::GameEngine;
use crate::events::{ActionEvent, Event, EventBus, LifecycleEvent};

/// Commands that can be sent to the session worker
pub enum Command {
    /// Apply an action and report the outcome.
    Submit {
        action: Action,
        reply: oneshot::Sender<ActionOutcome>,
    },
    /// Fired by the idle timer armed under `generation`.
    IdleTimeout { generation: u64 },
    /// Deferred system work scheduled by an earlier action.
    FollowUp { action: SystemAction },
    /// Query the current session (read-only).
    Snapshot { reply: oneshot::Sender<Session> },
    AvailableActions { reply: oneshot::Sender<Vec<String>> },
    /// Stop the worker and hand back the final session.
    Shutdown { reply: oneshot::Sender<Session> },
}

/// Background task that serializes every change to one session.
pub struct SessionWorker {
    session: Session,
    engine: GameEngine,
    command_rx: mpsc::Receiver<Command>,
    /// Timers hold the queue weakly so dropped handles still stop the worker.
    command_tx: mpsc::WeakSender<Command>,
    event_bus: EventBus,
    idle_timer: Option<JoinHandle<()>>,
    idle_generation: u64,
    follow_ups: Vec<JoinHandle<()>>,
}

impl SessionWorker {
    pub fn new(
        session: Session,
        engine: GameEngine,
        command_rx: mpsc::Receiver<Command>,
        command_tx: mpsc::WeakSender<Command>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            session,
            engine,
            command_rx,
            command_tx,
            event_bus,
            idle_timer: None,
            idle_generation: 0,
            follow_ups: Vec::new(),
        }
    }

    /// Main worker loop. `initial` holds the effects of the call that created
    /// the session (normally the first idle timer).
    pub async fn run(mut self, initial: Vec<Effect>) {
        self.event_bus
            .publish(Event::Lifecycle(LifecycleEvent::Started {
                session: self.session.id.clone(),
            }));
        self.apply_effects(&initial);

        while let Some(cmd) = self.command_rx.recv().await {
            if let Some(reply) = self.handle_command(cmd).await {
                self.cancel_timers();
                if reply.send(self.session.clone()).is_err() {
                    debug!("Shutdown reply channel closed (caller dropped)");
                }
                break;
            }
        }

        self.cancel_timers();
        info!(session = %self.session.id, "session worker stopped");
        self.event_bus
            .publish(Event::Lifecycle(LifecycleEvent::Closed {
                session: self.session.id.clone(),
            }));
    }

    /// Returns the shutdown reply when the worker should stop.
    async fn handle_command(&mut self, cmd: Command) -> Option<oneshot::Sender<Session>> {
        match cmd {
            Command::Submit { action, reply } => {
                let outcome = self.execute(action).await;
                if reply.send(outcome).is_err() {
                    debug!("Submit reply channel closed (caller dropped)");
                }
            }
            Command::IdleTimeout { generation } => {
                if generation == self.idle_generation {
                    self.execute(Action::system(SystemAction::IdleTimeout)).await;
                } else {
                    debug!(session = %self.session.id, generation, "stale idle timer ignored");
                }
            }
            Command::FollowUp { action } => {
                self.execute(Action::system(action)).await;
            }
            Command::Snapshot { reply } => {
                if reply.send(self.session.clone()).is_err() {
                    debug!("Snapshot reply channel closed (caller dropped)");
                }
            }
            Command::AvailableActions { reply } => {
                let actions = GameEngine::get_available_actions(&self.session);
                if reply.send(actions).is_err() {
                    debug!("AvailableActions reply channel closed (caller dropped)");
                }
            }
            Command::Shutdown { reply } => return Some(reply),
        }
        None
    }

    async fn execute(&mut self, action: Action) -> ActionOutcome {
        let outcome = self.engine.process_action(&self.session, &action).await;

        self.event_bus.publish(Event::Action(ActionEvent {
            session: self.session.id.clone(),
            action,
            success: outcome.success,
            phase: outcome.session.phase,
            message: outcome.message.clone(),
            error_code: outcome.error_code.map(str::to_string),
            effects: outcome.effects.clone(),
        }));

        if outcome.success {
            self.session = outcome.session.clone();
            self.apply_effects(&outcome.effects);
        }
        outcome
    }

    fn apply_effects(&mut self, effects: &[Effect]) {
        for effect in effects {
            match effect {
                Effect::SendMessage { .. } => {}
                Effect::EndGame { reason } => {
                    self.cancel_timers();
                    self.event_bus
                        .publish(Event::Lifecycle(LifecycleEvent::Ended {
                            session: self.session.id.clone(),
                            reason: *reason,
                        }));
                }
                Effect::ScheduleTimeout { after_ms } => self.arm_idle_timer(*after_ms),
                Effect::ScheduleFollowUp { action, delay_ms } => {
                    self.schedule_follow_up(action.clone(), *delay_ms)
                }
            }
        }
    }

    /// Replaces the running idle timer.
    fn arm_idle_timer(&mut self, after_ms: u64) {
        if let Some(timer) = self.idle_timer.take() {
            timer.abort();
        }
        self.idle_generation += 1;

        let generation = self.idle_generation;
        let command_tx = self.command_tx.clone();
        self.idle_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(after_ms)).await;
            if let Some(tx) = command_tx.upgrade()
                && tx.send(Command::IdleTimeout { generation }).await.is_err()
            {
                debug!("idle timer fired after the worker stopped");
            }
        }));
    }

    fn schedule_follow_up(&mut self, action: SystemAction, delay_ms: u64) {
        debug!(session = %self.session.id, %action, delay_ms, "follow-up scheduled");
        self.follow_ups.retain(|task| !task.is_finished());

        let command_tx = self.command_tx.clone();
        self.follow_ups.push(tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            if let Some(tx) = command_tx.upgrade()
                && tx.send(Command::FollowUp { action }).await.is_err()
            {
                debug!("follow-up fired after the worker stopped");
            }
        }));
    }

    fn cancel_timers(&mut self) {
        if let Some(timer) = self.idle_timer.take() {
            timer.abort();
        }
        self.idle_generation += 1;
        for task in self.follow_ups.drain(..) {
            task.abort();
        }
    }
}
