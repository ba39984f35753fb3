//! Story event resolution.
//!
//! Requirements are checked before anything is touched; a rejected choice
//! leaves the session exactly as it was. Accepted choices pay their costs,
//! complete the event permanently, and return the session to exploring unless
//! the outcome ends the game.

use crate::action::SystemAction;
use crate::error::{ErrorSeverity, GameError};
use crate::inventory::take_one;
use crate::progression::{self, level_up_message, milestone_for};
use crate::state::{
    ChoiceOutcome, ChoiceRequirements, EndReason, EventId, GamePhase, ItemId, Session, StoryEvent,
};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StoryError {
    #[error("there is no story event to respond to")]
    NoActiveEvent,

    #[error("choice {index} does not exist (there are {available})")]
    InvalidChoice { index: usize, available: usize },

    #[error("requires level {required} (you are level {current})")]
    LevelTooLow { required: u32, current: u32 },

    #[error("requires {required} credits (you have {available})")]
    InsufficientCredits { required: u32, available: u32 },

    #[error("requires {0}")]
    MissingItem(ItemId),
}

impl GameError for StoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoActiveEvent => ErrorSeverity::Internal,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoActiveEvent => "STORY_NO_ACTIVE_EVENT",
            Self::InvalidChoice { .. } => "STORY_INVALID_CHOICE",
            Self::LevelTooLow { .. } => "STORY_LEVEL_TOO_LOW",
            Self::InsufficientCredits { .. } => "STORY_INSUFFICIENT_CREDITS",
            Self::MissingItem(_) => "STORY_MISSING_ITEM",
        }
    }
}

/// Effect of an accepted choice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceResolution {
    pub event: EventId,
    pub choice: String,
    /// Message lines describing what happened.
    pub lines: Vec<String>,
    /// System action the host should submit after a delay.
    pub follow_up: Option<SystemAction>,
    /// Set when the choice ended the game.
    pub ended: Option<EndReason>,
}

/// Opens a story event and switches to the story phase.
pub fn present(session: &mut Session, event: StoryEvent) {
    session.story.current_event = Some(event);
    session.phase = GamePhase::StoryEvent;
}

pub fn check_requirements(
    session: &Session,
    requirements: &ChoiceRequirements,
) -> Result<(), StoryError> {
    if let Some(required) = requirements.min_level {
        if session.player.level < required {
            return Err(StoryError::LevelTooLow {
                required,
                current: session.player.level,
            });
        }
    }
    if let Some(required) = requirements.credit_cost {
        if session.player.credits < required {
            return Err(StoryError::InsufficientCredits {
                required,
                available: session.player.credits,
            });
        }
    }
    if let Some(item) = &requirements.required_item {
        if !session.inventory.contains(item) {
            return Err(StoryError::MissingItem(item.clone()));
        }
    }
    Ok(())
}

/// Accepts the choice at `index` of the current event.
pub fn resolve_choice(session: &mut Session, index: usize) -> Result<ChoiceResolution, StoryError> {
    let event = session
        .story
        .current_event
        .as_ref()
        .ok_or(StoryError::NoActiveEvent)?;
    let choice = event
        .choices
        .get(index)
        .ok_or(StoryError::InvalidChoice {
            index,
            available: event.choices.len(),
        })?
        .clone();
    check_requirements(session, &choice.requirements)?;

    let event_id = event.id.clone();
    let mut lines = vec![format!("You chose: {}", choice.text)];

    if let Some(cost) = choice.requirements.credit_cost {
        session.player.spend_credits(cost);
    }
    if choice.requirements.consumes_item {
        if let Some(item) = &choice.requirements.required_item {
            take_one(&mut session.inventory, item)
                .map_err(|_| StoryError::MissingItem(item.clone()))?;
        }
    }

    session.story.completed_events.insert(event_id.clone());
    session.story.current_event = None;
    session.phase = GamePhase::Exploring;

    let mut follow_up = None;
    let mut ended = None;
    match choice.outcome {
        ChoiceOutcome::Story {
            progress,
            credits,
            experience,
            game_over,
        } => {
            session.adjust_progress(progress);
            session.player.adjust_credits(credits);
            if let Some(level_up) = progression::add_experience(&mut session.player, experience) {
                lines.push(level_up_message(&level_up));
            }
            if game_over {
                ended = Some(EndReason::Defeat);
            }
        }
        ChoiceOutcome::Reward {
            credits,
            experience,
        } => {
            lines.push(format!("You gain {credits} credits and {experience} XP."));
            if let Some(level_up) = progression::grant(&mut session.player, credits, experience) {
                lines.push(level_up_message(&level_up));
            }
        }
        ChoiceOutcome::Combat => follow_up = Some(SystemAction::StartEncounter),
        ChoiceOutcome::Travel { destination } => {
            follow_up = Some(SystemAction::Travel { destination });
        }
    }

    if milestone_for(&event_id).is_some_and(|milestone| milestone.finale) {
        follow_up = None;
        ended = Some(EndReason::Victory);
        lines.push("Your journey reaches its end.".to_string());
    }
    if let Some(reason) = ended {
        session.finish(reason);
    }

    Ok(ChoiceResolution {
        event: event_id,
        choice: choice.text,
        lines,
        follow_up,
        ended,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Item, StoryChoice};
    use crate::testing::basic_session;

    fn choice(text: &str, requirements: ChoiceRequirements, outcome: ChoiceOutcome) -> StoryChoice {
        StoryChoice {
            text: text.into(),
            requirements,
            outcome,
        }
    }

    fn event(id: &str, choices: Vec<StoryChoice>) -> StoryEvent {
        StoryEvent {
            id: id.into(),
            title: "A Fork".into(),
            description: "Two paths.".into(),
            choices,
        }
    }

    fn with_event(event: StoryEvent) -> Session {
        let mut session = basic_session();
        session.phase = GamePhase::Exploring;
        present(&mut session, event);
        session
    }

    #[test]
    fn unmet_requirements_leave_session_untouched() {
        let mut session = with_event(event(
            "gate",
            vec![choice(
                "Bribe the guard",
                ChoiceRequirements {
                    credit_cost: Some(500),
                    ..Default::default()
                },
                ChoiceOutcome::Combat,
            )],
        ));
        let before = session.clone();

        let error = resolve_choice(&mut session, 0).unwrap_err();
        assert!(matches!(error, StoryError::InsufficientCredits { required: 500, .. }));
        assert_eq!(session, before);
    }

    #[test]
    fn out_of_range_choice_is_rejected() {
        let mut session = with_event(event("gate", vec![choice("Wait", Default::default(), ChoiceOutcome::Combat)]));
        let error = resolve_choice(&mut session, 3).unwrap_err();
        assert_eq!(error, StoryError::InvalidChoice { index: 3, available: 1 });
    }

    #[test]
    fn accepted_choice_pays_costs_and_completes_event() {
        let mut session = with_event(event(
            "gate",
            vec![choice(
                "Hand over the token",
                ChoiceRequirements {
                    credit_cost: Some(30),
                    required_item: Some("token".into()),
                    consumes_item: true,
                    ..Default::default()
                },
                ChoiceOutcome::Reward {
                    credits: 10,
                    experience: 20,
                },
            )],
        ));
        session.inventory.items.push(Item::key("token", "Token"));

        let resolution = resolve_choice(&mut session, 0).unwrap();
        assert_eq!(resolution.follow_up, None);
        assert_eq!(session.player.credits, 100 - 30 + 10);
        assert_eq!(session.player.experience, 20);
        assert!(!session.inventory.contains(&"token".into()));
        assert!(session.story.is_completed(&"gate".into()));
        assert!(session.story.current_event.is_none());
        assert_eq!(session.phase, GamePhase::Exploring);
    }

    #[test]
    fn combat_and_travel_request_follow_ups() {
        let mut session = with_event(event("ambush", vec![choice("Fight", Default::default(), ChoiceOutcome::Combat)]));
        let resolution = resolve_choice(&mut session, 0).unwrap();
        assert_eq!(resolution.follow_up, Some(SystemAction::StartEncounter));

        let mut session = with_event(event(
            "road",
            vec![choice("Leave", Default::default(), ChoiceOutcome::Travel { destination: None })],
        ));
        let resolution = resolve_choice(&mut session, 0).unwrap();
        assert_eq!(resolution.follow_up, Some(SystemAction::Travel { destination: None }));
    }

    #[test]
    fn story_game_over_ends_the_session() {
        let mut session = with_event(event(
            "cliff",
            vec![choice(
                "Jump",
                Default::default(),
                ChoiceOutcome::Story {
                    progress: 0,
                    credits: 0,
                    experience: 0,
                    game_over: true,
                },
            )],
        ));
        let resolution = resolve_choice(&mut session, 0).unwrap();
        assert_eq!(resolution.ended, Some(EndReason::Defeat));
        assert_eq!(session.phase, GamePhase::GameOver);
        assert!(!session.is_active);
    }

    #[test]
    fn finale_always_ends_in_victory() {
        let mut session = with_event(event(
            "milestone_finale",
            vec![choice("Walk on", Default::default(), ChoiceOutcome::Combat)],
        ));
        let resolution = resolve_choice(&mut session, 0).unwrap();
        assert_eq!(resolution.ended, Some(EndReason::Victory));
        assert_eq!(resolution.follow_up, None);
        assert_eq!(session.end_reason, Some(EndReason::Victory));
    }
}
