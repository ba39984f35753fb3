//! Deterministic rules and data types for the chat-bot role-playing game.
//!
//! `rpg-core` defines the canonical session model (player, world graph,
//! inventory, combat, story) and the pure rule functions that transform it.
//! It never performs I/O: procedural content arrives through the request and
//! response types in [`env`], and the async orchestration that consults the
//! content generator lives in the runtime crate.
pub mod action;
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod inventory;
pub mod progression;
pub mod state;
pub mod story;
pub mod world;

pub use action::{
    Action, ActionError, ActionKind, ActionOutcome, Effect, ParseActionError, SystemAction,
    available_actions, available_labels,
};
pub use combat::{CombatOutcome, EnemyStrike};
pub use config::GameConfig;
pub use env::{
    AreaRequest, CombatActionRequest, ContentOracle, Dice, EnemyMove, EnemyRequest,
    GeneratedCombatAction, Loot, LootRequest, LootSource, PcgRng, PlayerStats, RngOracle, Roll,
    StoryEventRequest, compute_seed,
};
pub use error::{ErrorSeverity, GameError};
pub use inventory::{AcquireOutcome, InventoryError};
pub use progression::{LevelUp, MILESTONES, Milestone};
pub use state::{
    Abilities, Ability, AbilityId, Area, AreaId, ChoiceOutcome, ChoiceRequirements, CombatState,
    ConsumableEffect, DangerLevel, Difficulty, Direction, EncounterTable, EndCheck, EndReason,
    Enemy, EquipmentItem, EquipmentSlot, EquipmentSlots, EquipmentStats, EventId, Exit, GamePhase,
    Exits, Inventory, Item, ItemCategory, ItemId, ItemPayload, Objective, ObjectiveTarget, Player,
    PlayerId, Quest, QuestLog, QuestProgress, Rarity, Rewards, Session, SessionId, SessionSeed,
    Settings, Story, StoryChoice, StoryEvent, World, check_end_conditions,
};
pub use story::StoryError;
pub use world::{Encounter, MoveError, SearchOutcome};

#[cfg(test)]
pub(crate) mod testing {
    use crate::config::GameConfig;
    use crate::state::{
        Ability, Area, DangerLevel, Direction, Enemy, Exit, Item, Session, SessionSeed,
    };

    pub fn session_with(start: Area, items: Vec<Item>) -> Session {
        Session::new(
            SessionSeed {
                id: "session".into(),
                host: "player".into(),
                seed: 7,
                created_at: 0,
                difficulty: Default::default(),
                starting_area: start,
                starting_items: items,
                quests: Vec::new(),
            },
            &GameConfig::default(),
        )
    }

    pub fn basic_session() -> Session {
        let start = Area::new("start", "Start", DangerLevel::Safe)
            .with_exit(Exit::open(Direction::North, "north_room"));
        session_with(start, Vec::new())
    }

    pub fn enemy(health: u32, attack: u32, defense: u32) -> Enemy {
        Enemy {
            id: "wolf".into(),
            name: "Wolf".into(),
            level: 1,
            health,
            max_health: health.max(1),
            attack,
            defense,
            abilities: Default::default(),
            rewards: Default::default(),
        }
    }

    pub fn ability(id: &str, current_cooldown: u32) -> Ability {
        Ability {
            id: id.into(),
            name: id.into(),
            power: 0,
            cost: 0,
            cooldown: 2,
            current_cooldown,
        }
    }
}
