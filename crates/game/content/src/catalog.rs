//! Built-in story events for the progress milestones.
//!
//! Operators can replace any of them with a RON catalog (see
//! `loaders::StoryCatalogLoader`); events are matched by id.

use std::collections::BTreeMap;

use rpg_core::{
    ChoiceOutcome, ChoiceRequirements, EventId, StoryChoice, StoryEvent,
    progression::MILESTONES,
};

use crate::starter::HEALTH_POTION;

/// Story events keyed by id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StoryCatalog {
    pub events: Vec<StoryEvent>,
}

impl StoryCatalog {
    /// The built-in milestone events.
    pub fn builtin() -> Self {
        Self {
            events: vec![awakening(), crossroads(), reckoning(), threshold(), finale()],
        }
    }

    pub fn get(&self, id: &EventId) -> Option<&StoryEvent> {
        self.events.iter().find(|event| &event.id == id)
    }

    /// Layers `overrides` on top of this catalog; later entries win.
    pub fn merged(self, overrides: StoryCatalog) -> Self {
        let mut by_id: BTreeMap<EventId, StoryEvent> = self
            .events
            .into_iter()
            .map(|event| (event.id.clone(), event))
            .collect();
        for event in overrides.events.into_iter().filter(StoryEvent::is_well_formed) {
            by_id.insert(event.id.clone(), event);
        }
        Self {
            events: by_id.into_values().collect(),
        }
    }

    /// Whether every milestone has an event.
    pub fn covers_milestones(&self) -> bool {
        MILESTONES
            .iter()
            .all(|milestone| self.get(&milestone.event_id()).is_some())
    }
}

fn choice(text: &str, outcome: ChoiceOutcome) -> StoryChoice {
    StoryChoice {
        text: text.to_string(),
        requirements: ChoiceRequirements::default(),
        outcome,
    }
}

fn story(progress: i32, credits: i32, experience: u32) -> ChoiceOutcome {
    ChoiceOutcome::Story {
        progress,
        credits,
        experience,
        game_over: false,
    }
}

fn awakening() -> StoryEvent {
    StoryEvent {
        id: "milestone_awakening".into(),
        title: "Stirring Echoes".into(),
        description: "A low hum rises from the ground. Old markings on the stones begin to glow."
            .into(),
        choices: vec![
            choice("Follow the echoes into the dark", ChoiceOutcome::Combat),
            StoryChoice {
                requirements: ChoiceRequirements {
                    min_level: Some(2),
                    ..Default::default()
                },
                ..choice("Study the markings", story(5, 0, 40))
            },
            choice(
                "Ignore them and rest a while",
                ChoiceOutcome::Reward {
                    credits: 20,
                    experience: 10,
                },
            ),
        ],
    }
}

fn crossroads() -> StoryEvent {
    StoryEvent {
        id: "milestone_crossroads".into(),
        title: "The Crossroads Merchant".into(),
        description: "A hooded merchant waits where four roads meet, scales in hand.".into(),
        choices: vec![
            StoryChoice {
                requirements: ChoiceRequirements {
                    credit_cost: Some(50),
                    ..Default::default()
                },
                ..choice(
                    "Pay for directions to somewhere new",
                    ChoiceOutcome::Travel { destination: None },
                )
            },
            StoryChoice {
                requirements: ChoiceRequirements {
                    required_item: Some(HEALTH_POTION.into()),
                    consumes_item: true,
                    ..Default::default()
                },
                ..choice(
                    "Trade a health potion",
                    ChoiceOutcome::Reward {
                        credits: 60,
                        experience: 30,
                    },
                )
            },
            choice("Nod and walk on", story(3, 0, 10)),
        ],
    }
}

fn reckoning() -> StoryEvent {
    StoryEvent {
        id: "milestone_reckoning".into(),
        title: "The Warden's Challenge".into(),
        description: "An armored figure bars the path and raises a notched blade.".into(),
        choices: vec![
            choice("Accept the duel", ChoiceOutcome::Combat),
            StoryChoice {
                requirements: ChoiceRequirements {
                    min_level: Some(4),
                    ..Default::default()
                },
                ..choice("Slip past in the shadows", story(5, 0, 80))
            },
        ],
    }
}

fn threshold() -> StoryEvent {
    StoryEvent {
        id: "milestone_threshold".into(),
        title: "The Last Gate".into(),
        description: "A gate of black iron stands open. Beyond it the air shimmers.".into(),
        choices: vec![
            choice(
                "Step through the gate",
                ChoiceOutcome::Travel { destination: None },
            ),
            choice(
                "Gather your strength first",
                ChoiceOutcome::Reward {
                    credits: 40,
                    experience: 60,
                },
            ),
        ],
    }
}

fn finale() -> StoryEvent {
    StoryEvent {
        id: "milestone_finale".into(),
        title: "The Heart of the World".into(),
        description: "Every road you walked has led here. The light at the center waits.".into(),
        choices: vec![
            choice("Claim your destiny", story(0, 100, 100)),
            choice("Leave the light untouched", story(0, 0, 50)),
        ],
    }
}

/// Event used when an unknown id is requested.
pub fn interlude(id: EventId) -> StoryEvent {
    StoryEvent {
        id,
        title: "A Quiet Moment".into(),
        description: "The road is calm for once.".into(),
        choices: vec![choice(
            "Catch your breath",
            ChoiceOutcome::Reward {
                credits: 5,
                experience: 5,
            },
        )],
    }
}
