//! Phase state machine.
//!
//! [`GameEngine::process_action`] validates an action against the session,
//! applies it to a private copy, and returns the copy together with the
//! effects the host must carry out. Rejected actions hand back an unchanged
//! clone of the input. Handlers are split by phase:
//!
//! - [`explore`]: begin, movement, travel, search, rest, milestones
//! - [`combat`]: encounters, the player's half-round, the enemy's reply
//! - [`inventory`]: the pack, consumables, manual equip
//! - [`story`]: story choices
mod combat;
mod explore;
mod inventory;
mod narrate;
mod story;

use tracing::{debug, error, info, warn};

use rpg_core::action::is_allowed;
use rpg_core::inventory::acquire;
use rpg_core::progression::{self, level_up_message, reward_quests};
use rpg_core::{
    AcquireOutcome, Action, ActionError, ActionKind, ActionOutcome, Difficulty, Effect, EndCheck,
    EndReason, GameConfig, GameError, Item, PlayerId, QuestProgress, Session,
    SessionId, SessionSeed, SystemAction, available_labels,
};

use crate::content::ContentGateway;

/// A freshly created session and the effects announcing it.
#[derive(Clone, Debug)]
pub struct GameStart {
    pub session: Session,
    pub effects: Vec<Effect>,
}

/// Composes the core rules with the content gateway.
#[derive(Clone)]
pub struct GameEngine {
    gateway: ContentGateway,
    config: GameConfig,
}

impl GameEngine {
    pub fn new(gateway: ContentGateway, config: GameConfig) -> Self {
        Self { gateway, config }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn gateway(&self) -> &ContentGateway {
        &self.gateway
    }

    /// Creates a session in the intro phase with a random seed.
    pub fn start_game(
        &self,
        host: PlayerId,
        session_id: SessionId,
        difficulty: Option<Difficulty>,
    ) -> GameStart {
        self.start_game_seeded(host, session_id, difficulty, rand::random())
    }

    /// Creates a session with a caller-chosen seed, making every roll of the
    /// game reproducible.
    pub fn start_game_seeded(
        &self,
        host: PlayerId,
        session_id: SessionId,
        difficulty: Option<Difficulty>,
        seed: u64,
    ) -> GameStart {
        let session = Session::new(
            SessionSeed {
                id: session_id,
                host,
                seed,
                created_at: chrono::Utc::now().timestamp_millis(),
                difficulty: difficulty.unwrap_or_default(),
                starting_area: self.gateway.starting_area(),
                starting_items: self.gateway.starting_items(),
                quests: self.gateway.starting_quests(),
            },
            &self.config,
        );

        info!(
            session = %session.id,
            host = %session.host,
            difficulty = %session.settings.difficulty,
            "game started"
        );

        let effects = vec![
            Effect::message(narrate::intro(&session)),
            Effect::ScheduleTimeout {
                after_ms: session.settings.idle_timeout_ms,
            },
        ];
        GameStart { session, effects }
    }

    /// Applies one action. Never fails: rejections come back as an
    /// unsuccessful outcome holding the untouched session.
    pub async fn process_action(&self, session: &Session, action: &Action) -> ActionOutcome {
        if let Err(error) = validate(session, action) {
            report(session, action, &error);
            return ActionOutcome::rejected(session.clone(), &error);
        }

        let mut next = session.clone();
        if let Action::Player { kind, .. } = action {
            next.story.remember(kind.to_string());
        }

        let mut turn = Turn::default();
        debug!(session = %session.id, %action, phase = %session.phase, "dispatching action");
        if let Err(error) = self.dispatch(&mut next, action, &mut turn).await {
            report(session, action, &error);
            return ActionOutcome::rejected(session.clone(), &error);
        }

        if !next.invariants_hold() {
            let error = ActionError::InvariantViolation(action.to_string());
            report(session, action, &error);
            return ActionOutcome::rejected(session.clone(), &error);
        }

        next.nonce += 1;
        if next.phase != session.phase {
            info!(session = %next.id, from = %session.phase, to = %next.phase, "phase changed");
        }
        if next.is_active && !action.is_system() {
            turn.schedule(Effect::ScheduleTimeout {
                after_ms: next.settings.idle_timeout_ms,
            });
        }

        let (effects, message) = turn.finish();
        ActionOutcome::applied(next, effects, message)
    }

    pub fn check_end_conditions(session: &Session) -> EndCheck {
        rpg_core::check_end_conditions(session)
    }

    /// Action strings a player may submit right now.
    pub fn get_available_actions(session: &Session) -> Vec<String> {
        available_labels(session)
    }

    async fn dispatch(
        &self,
        session: &mut Session,
        action: &Action,
        turn: &mut Turn,
    ) -> Result<(), ActionError> {
        match action {
            Action::System { kind } => match kind {
                SystemAction::StartEncounter => self.start_encounter(session, turn).await,
                SystemAction::Travel { destination } => {
                    self.travel(session, destination.clone(), turn).await
                }
                SystemAction::IdleTimeout => {
                    turn.say("The adventure fades after a long silence.");
                    turn.end(session, EndReason::Timeout);
                    Ok(())
                }
            },
            Action::Player { kind, .. } => match kind {
                ActionKind::Begin => self.begin(session, turn),
                ActionKind::Move { direction } => self.move_to(session, *direction, turn).await,
                ActionKind::Search => self.search(session, turn).await,
                ActionKind::Rest => explore::rest(session, turn),
                ActionKind::OpenInventory => inventory::open(session, turn),
                ActionKind::CloseInventory => inventory::close(session, turn),
                ActionKind::UseItem { item } => inventory::use_item(session, item, turn),
                ActionKind::Equip { item } => inventory::equip(session, item, turn),
                ActionKind::Attack => self.attack(session, turn).await,
                ActionKind::Defend => self.defend(session, turn).await,
                ActionKind::Flee => self.flee(session, turn).await,
                ActionKind::Choose { index } => self.choose(session, *index, turn).await,
                ActionKind::Quit => {
                    turn.say("You set down your pack. The adventure is over.");
                    turn.end(session, EndReason::Quit);
                    Ok(())
                }
            },
        }
    }
}

fn validate(session: &Session, action: &Action) -> Result<(), ActionError> {
    if !session.is_active || session.phase.is_terminal() {
        return Err(ActionError::Inactive(session.id.clone()));
    }
    if let Action::Player { actor, .. } = action
        && !session.is_member(actor)
    {
        return Err(ActionError::NotMember(actor.clone()));
    }
    if !is_allowed(session, action) {
        return Err(ActionError::NotAllowed {
            phase: session.phase,
            action: action.to_string(),
        });
    }
    Ok(())
}

fn report(session: &Session, action: &Action, error: &ActionError) {
    let code = error.error_code();
    if error.severity().is_internal() {
        error!(session = %session.id, %action, code, %error, "action failed");
    } else {
        warn!(session = %session.id, %action, code, %error, "action rejected");
    }
}

/// Messages and effects accumulated while one action is applied.
#[derive(Debug, Default)]
pub(crate) struct Turn {
    lines: Vec<String>,
    effects: Vec<Effect>,
}

impl Turn {
    pub(crate) fn say(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub(crate) fn say_all(&mut self, lines: impl IntoIterator<Item = String>) {
        self.lines.extend(lines);
    }

    pub(crate) fn schedule(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    /// Ends the session and tells the host.
    pub(crate) fn end(&mut self, session: &mut Session, reason: EndReason) {
        session.finish(reason);
        info!(session = %session.id, %reason, "game over");
        self.effects.push(Effect::EndGame { reason });
    }

    /// The combined message goes first, followed by the scheduled effects.
    fn finish(self) -> (Vec<Effect>, Option<String>) {
        let message = (!self.lines.is_empty()).then(|| self.lines.join("\n"));
        let mut effects = Vec::with_capacity(self.effects.len() + 1);
        if let Some(text) = &message {
            effects.push(Effect::message(text.clone()));
        }
        effects.extend(self.effects);
        (effects, message)
    }
}

/// Hands an item to the player and reports what happened to it.
pub(crate) fn take_item(session: &mut Session, item: Item, turn: &mut Turn) {
    let id = item.id.clone();
    let outcome = acquire(session, item);
    turn.say(outcome.describe());

    match &outcome {
        AcquireOutcome::Rejected { name, error } => {
            warn!(session = %session.id, item = %name, %error, "item not stored");
        }
        _ => {
            let completed = session.quests.record(QuestProgress::ItemAcquired(&id));
            turn.say_all(reward_quests(session, &completed));
        }
    }
}

/// Credits and experience with a level-up line when one happened.
pub(crate) fn grant(session: &mut Session, credits: u32, experience: u32, turn: &mut Turn) {
    if let Some(level_up) = progression::grant(&mut session.player, credits, experience) {
        info!(session = %session.id, level = level_up.to, "level up");
        turn.say(level_up_message(&level_up));
    }
}
