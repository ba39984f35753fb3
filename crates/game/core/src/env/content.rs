//! Content contract shared by the generator and its deterministic fallback.
//!
//! Requests carry the structured context the engine hands to a content source.
//! Responses are plain state types ([`Area`], [`Enemy`], [`StoryEvent`]) plus
//! the two response shapes defined here. A [`ContentOracle`] answers every
//! request synchronously and infallibly; the runtime falls back to one whenever
//! the remote generator fails or times out.

use crate::state::{
    AbilityId, Area, AreaId, DangerLevel, Difficulty, Direction, Enemy, EventId, Item, Quest,
    StoryEvent,
};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AreaRequest {
    pub current_area: AreaId,
    /// Id the new area will be stored under.
    pub target_area: AreaId,
    pub player_level: u32,
    pub story_progress: u8,
    pub explored_areas: Vec<AreaId>,
    /// Direction travelled from `current_area`; `None` for story travel.
    pub direction: Option<Direction>,
    pub seed: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyRequest {
    pub player_level: u32,
    pub danger: DangerLevel,
    pub story_progress: u8,
    pub difficulty: Difficulty,
    pub area_name: String,
    pub seed: u64,
}

/// Player numbers an enemy may react to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerStats {
    pub level: u32,
    pub health: u32,
    pub max_health: u32,
    pub attack_bonus: u32,
    pub defense_bonus: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatActionRequest {
    pub enemy: Enemy,
    pub player: PlayerStats,
    pub round: u32,
    pub recent_history: Vec<String>,
    pub available_abilities: Vec<AbilityId>,
}

/// Where a loot roll comes from; shapes generated rewards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum LootSource {
    Combat,
    Treasure,
    Search,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootRequest {
    pub player_level: u32,
    pub danger: DangerLevel,
    pub source: LootSource,
    pub difficulty: Difficulty,
    pub seed: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StoryEventRequest {
    /// Milestone event id the generated event will be recorded under.
    pub event_id: EventId,
    pub current_area: AreaId,
    pub player_level: u32,
    pub story_progress: u8,
    pub completed_events: Vec<EventId>,
    pub recent_actions: Vec<String>,
    /// Whether this is the terminal milestone.
    pub finale: bool,
    pub seed: u64,
}

/// Kind of move an enemy makes on its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnemyMove {
    Attack,
    Ability,
    Defend,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneratedCombatAction {
    pub action: EnemyMove,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ability: Option<AbilityId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub narrative: String,
}

impl GeneratedCombatAction {
    pub fn attack(narrative: impl Into<String>) -> Self {
        Self {
            action: EnemyMove::Attack,
            ability: None,
            damage: None,
            narrative: narrative.into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Loot {
    pub items: Vec<Item>,
    pub credits: u32,
    pub experience: u32,
    pub narrative: String,
}

/// Deterministic, infallible content source.
///
/// The same request must always yield the same content.
pub trait ContentOracle: Send + Sync {
    /// Area every new session starts in.
    fn starting_area(&self) -> Area;

    /// Items every new session starts with.
    fn starting_items(&self) -> Vec<Item>;

    /// Quests every new session starts with.
    fn starting_quests(&self) -> Vec<Quest>;

    fn area(&self, request: &AreaRequest) -> Area;

    fn enemy(&self, request: &EnemyRequest) -> Enemy;

    fn combat_action(&self, request: &CombatActionRequest) -> GeneratedCombatAction;

    fn loot(&self, request: &LootRequest) -> Loot;

    fn story_event(&self, request: &StoryEventRequest) -> StoryEvent;
}
