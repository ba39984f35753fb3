//! World graph types.
//!
//! The world is an arena of areas keyed by id. Areas are inserted the first
//! time they are reached and are never removed, so the graph only grows.

use std::collections::BTreeMap;

use arrayvec::ArrayVec;

use super::{AreaId, DangerLevel, Direction, ItemId};
use crate::config::GameConfig;

/// Directed connection from one area to another.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Exit {
    pub direction: Direction,
    pub target: AreaId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub locked: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub required_item: Option<ItemId>,
}

impl Exit {
    pub fn open(direction: Direction, target: impl Into<AreaId>) -> Self {
        Self {
            direction,
            target: target.into(),
            locked: false,
            required_item: None,
        }
    }

    pub fn locked(direction: Direction, target: impl Into<AreaId>, key: impl Into<ItemId>) -> Self {
        Self {
            direction,
            target: target.into(),
            locked: true,
            required_item: Some(key.into()),
        }
    }
}

/// Percent chances (0..=100) rolled when arriving in or searching an area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EncounterTable {
    pub enemy: u32,
    pub treasure: u32,
}

impl EncounterTable {
    pub const fn new(enemy: u32, treasure: u32) -> Self {
        Self { enemy, treasure }
    }

    /// Clamps both chances into the percent range.
    pub fn clamped(self) -> Self {
        Self {
            enemy: self.enemy.min(100),
            treasure: self.treasure.min(100),
        }
    }
}

pub type Exits = ArrayVec<Exit, { GameConfig::MAX_EXITS }>;

/// A node of the world graph.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Area {
    pub id: AreaId,
    pub name: String,
    pub description: String,
    pub danger: DangerLevel,
    pub exits: Exits,
    #[cfg_attr(feature = "serde", serde(default))]
    pub encounters: EncounterTable,
    #[cfg_attr(feature = "serde", serde(default))]
    pub discovered: bool,
}

impl Area {
    /// Creates an undiscovered area with no exits and no encounters.
    pub fn new(id: impl Into<AreaId>, name: impl Into<String>, danger: DangerLevel) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            danger,
            exits: Exits::new(),
            encounters: EncounterTable::default(),
            discovered: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Adds an exit; exits beyond the capacity are ignored.
    pub fn with_exit(mut self, exit: Exit) -> Self {
        let _ = self.exits.try_push(exit);
        self
    }

    pub fn with_encounters(mut self, enemy: u32, treasure: u32) -> Self {
        self.encounters = EncounterTable::new(enemy, treasure).clamped();
        self
    }

    pub fn exit(&self, direction: Direction) -> Option<&Exit> {
        self.exits.iter().find(|exit| exit.direction == direction)
    }

    pub fn exit_mut(&mut self, direction: Direction) -> Option<&mut Exit> {
        self.exits.iter_mut().find(|exit| exit.direction == direction)
    }

    pub fn has_exit(&self, direction: Direction) -> bool {
        self.exit(direction).is_some()
    }
}

/// World graph plus the exits currently offered to the player.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct World {
    pub areas: BTreeMap<AreaId, Area>,
    /// Discovery order of areas, oldest first.
    pub explored: Vec<AreaId>,
    pub available_exits: Vec<Exit>,
}

impl World {
    pub fn area(&self, id: &AreaId) -> Option<&Area> {
        self.areas.get(id)
    }

    pub fn area_mut(&mut self, id: &AreaId) -> Option<&mut Area> {
        self.areas.get_mut(id)
    }

    pub fn contains(&self, id: &AreaId) -> bool {
        self.areas.contains_key(id)
    }

    pub fn discovered_count(&self) -> usize {
        self.explored.len()
    }
}
