//! Authoritative session representation.
//!
//! A [`Session`] is the whole persisted state of one game. Hosts hand the full
//! value to the engine on every call and receive a new value back; the rules
//! in this crate only ever mutate a private copy.
pub mod types;

pub use types::{
    Abilities, Ability, AbilityId, Area, AreaId, ChoiceOutcome, ChoiceRequirements, CombatState,
    ConsumableEffect, DangerLevel, Difficulty, Direction, EncounterTable, Enemy, EquipmentItem,
    EquipmentSlot, EquipmentSlots, EquipmentStats, EventId, Exit, Exits, GamePhase, Inventory,
    Item, ItemCategory, ItemId, ItemPayload, Objective, ObjectiveTarget, Player, PlayerId, Quest,
    QuestLog, QuestProgress, Rarity, Rewards, SessionId, Story, StoryChoice, StoryEvent, World,
};

use crate::config::GameConfig;
use crate::env::{Dice, PcgRng};

/// Why a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EndReason {
    Victory,
    Defeat,
    Quit,
    Timeout,
}

/// Per-session options fixed at game start.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Settings {
    pub difficulty: Difficulty,
    pub idle_timeout_ms: u64,
    pub follow_up_delay_ms: u64,
}

/// Inputs required to create a session.
#[derive(Clone, Debug)]
pub struct SessionSeed {
    pub id: SessionId,
    pub host: PlayerId,
    pub seed: u64,
    pub created_at: i64,
    pub difficulty: Difficulty,
    pub starting_area: Area,
    pub starting_items: Vec<Item>,
    pub quests: Vec<Quest>,
}

/// Canonical snapshot of one game.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Session {
    pub id: SessionId,
    pub host: PlayerId,
    pub phase: GamePhase,
    /// Phase the inventory returns to when it closes.
    pub return_phase: Option<GamePhase>,
    pub is_active: bool,
    /// Creation time in Unix milliseconds.
    pub created_at: i64,
    /// Percentage in 0..=100.
    pub story_progress: u8,
    pub current_area: AreaId,
    /// RNG seed set once at creation.
    pub seed: u64,
    /// Count of successfully processed actions; mixed into every roll.
    pub nonce: u64,
    pub player: Player,
    pub equipment: EquipmentSlots,
    pub inventory: Inventory,
    pub world: World,
    pub combat: Option<CombatState>,
    pub story: Story,
    pub quests: QuestLog,
    pub settings: Settings,
    pub end_reason: Option<EndReason>,
}

impl Session {
    /// Creates a session in the intro phase with the starting area discovered.
    pub fn new(seed: SessionSeed, config: &GameConfig) -> Self {
        let mut starting_area = seed.starting_area;
        starting_area.discovered = true;
        let start_id = starting_area.id.clone();

        let mut world = World::default();
        world.available_exits = starting_area.exits.iter().cloned().collect();
        world.explored.push(start_id.clone());
        world.areas.insert(start_id.clone(), starting_area);

        let mut inventory = Inventory::new(config.max_inventory_slots);
        for item in seed.starting_items.into_iter().filter(Item::is_well_formed) {
            if inventory.is_full() {
                break;
            }
            inventory.items.push(item);
        }

        Self {
            id: seed.id,
            host: seed.host,
            phase: GamePhase::Intro,
            return_phase: None,
            is_active: true,
            created_at: seed.created_at,
            story_progress: 0,
            current_area: start_id,
            seed: seed.seed,
            nonce: 0,
            player: Player::new(config.starting_credits),
            equipment: EquipmentSlots::empty(),
            inventory,
            world,
            combat: None,
            story: Story::default(),
            quests: QuestLog::new(seed.quests),
            settings: Settings {
                difficulty: seed.difficulty,
                idle_timeout_ms: config.idle_timeout_ms,
                follow_up_delay_ms: config.follow_up_delay_ms,
            },
            end_reason: None,
        }
    }

    /// Single-player sessions have exactly one member: the host.
    pub fn is_member(&self, player: &PlayerId) -> bool {
        &self.host == player
    }

    pub fn area(&self) -> Option<&Area> {
        self.world.area(&self.current_area)
    }

    pub fn danger(&self) -> DangerLevel {
        self.area().map_or(DangerLevel::Safe, |area| area.danger)
    }

    /// Dice bound to the current action's nonce.
    pub fn dice(&self) -> Dice<'static, PcgRng> {
        Dice::pcg(self.seed, self.nonce)
    }

    /// Raises story progress (capped at 100), returning the new value.
    pub fn advance_progress(&mut self, amount: u8) -> u8 {
        self.story_progress = self.story_progress.saturating_add(amount).min(100);
        self.story_progress
    }

    /// Applies a signed progress delta, clamped to 0..=100.
    pub fn adjust_progress(&mut self, delta: i32) -> u8 {
        let next = (i32::from(self.story_progress) + delta).clamp(0, 100);
        self.story_progress = next as u8;
        self.story_progress
    }

    /// Moves the session into its terminal phase.
    pub fn finish(&mut self, reason: EndReason) {
        self.phase = GamePhase::GameOver;
        self.is_active = false;
        self.combat = None;
        self.return_phase = None;
        self.end_reason = Some(reason);
    }

    /// Checks the resource and capacity invariants every transition must keep.
    pub fn invariants_hold(&self) -> bool {
        let in_fight = self.phase == GamePhase::Combat
            || (self.phase == GamePhase::Inventory && self.return_phase == Some(GamePhase::Combat));

        self.player.resources_within_bounds()
            && self.player.level >= 1
            && self.player.experience < self.player.experience_to_next
            && self.player.experience_to_next == self.player.level * GameConfig::EXPERIENCE_PER_LEVEL
            && self.inventory.len() <= self.inventory.max_slots
            && self.inventory.items.iter().all(|item| item.quantity >= 1)
            && self.story_progress <= 100
            && in_fight == self.combat.is_some()
    }
}

/// Answer to "should the host tear this session down?".
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EndCheck {
    pub should_end: bool,
    pub winner: Option<PlayerId>,
    pub reason: Option<EndReason>,
}

/// Evaluates whether a session has reached an end state.
pub fn check_end_conditions(session: &Session) -> EndCheck {
    let reason = session.end_reason.or_else(|| {
        if !session.player.is_alive() {
            Some(EndReason::Defeat)
        } else {
            None
        }
    });
    let should_end =
        !session.is_active || session.phase.is_terminal() || !session.player.is_alive();
    let winner = match reason {
        Some(EndReason::Victory) => Some(session.host.clone()),
        _ => None,
    };

    EndCheck {
        should_end,
        winner,
        reason: if should_end { reason } else { None },
    }
}
