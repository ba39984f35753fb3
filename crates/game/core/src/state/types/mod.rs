//! Value types composed into a [`Session`](crate::state::Session).
mod combat;
mod common;
mod equipment;
mod inventory;
mod item;
mod player;
mod quest;
mod story;
mod world;

pub use combat::{Abilities, Ability, CombatState, Enemy, Rewards};
pub use common::{
    AbilityId, AreaId, DangerLevel, Difficulty, Direction, EventId, GamePhase, ItemId, PlayerId,
    SessionId,
};
pub use equipment::EquipmentSlots;
pub use inventory::Inventory;
pub use item::{
    ConsumableEffect, EquipmentItem, EquipmentSlot, EquipmentStats, Item, ItemCategory,
    ItemPayload, Rarity,
};
pub use player::Player;
pub use quest::{Objective, ObjectiveTarget, Quest, QuestLog, QuestProgress};
pub use story::{ChoiceOutcome, ChoiceRequirements, Story, StoryChoice, StoryEvent};
pub use world::{Area, EncounterTable, Exit, Exits, World};
