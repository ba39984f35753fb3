//! Story event types.

use std::collections::{BTreeSet, VecDeque};

use super::{AreaId, EventId, ItemId};
use crate::config::GameConfig;

/// Preconditions a choice imposes on the player.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChoiceRequirements {
    pub min_level: Option<u32>,
    /// Credits that must be available; deducted when the choice is taken.
    pub credit_cost: Option<u32>,
    pub required_item: Option<ItemId>,
    /// Whether one unit of `required_item` is consumed by the choice.
    pub consumes_item: bool,
}

/// What happens after a choice is accepted.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChoiceOutcome {
    /// Narrative consequence with optional resource adjustments.
    Story {
        progress: i32,
        credits: i32,
        experience: u32,
        game_over: bool,
    },
    Reward {
        credits: u32,
        experience: u32,
    },
    /// The host should follow up with an encounter.
    Combat,
    /// The host should follow up with a location change.
    Travel { destination: Option<AreaId> },
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StoryChoice {
    pub text: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub requirements: ChoiceRequirements,
    pub outcome: ChoiceOutcome,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StoryEvent {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub choices: Vec<StoryChoice>,
}

impl StoryEvent {
    pub fn is_well_formed(&self) -> bool {
        !self.title.trim().is_empty()
            && !self.choices.is_empty()
            && self.choices.len() <= GameConfig::MAX_CHOICES
    }
}

/// Narrative bookkeeping carried by the session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Story {
    pub completed_events: BTreeSet<EventId>,
    pub current_event: Option<StoryEvent>,
    /// Most recent player actions, oldest first.
    pub recent_actions: VecDeque<String>,
}

impl Story {
    pub fn is_completed(&self, id: &EventId) -> bool {
        self.completed_events.contains(id)
    }

    pub fn remember(&mut self, action: impl Into<String>) {
        if self.recent_actions.len() == GameConfig::HISTORY_LEN {
            self.recent_actions.pop_front();
        }
        self.recent_actions.push_back(action.into());
    }
}
