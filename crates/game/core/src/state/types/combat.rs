//! Combat-scoped state.
//!
//! [`CombatState`] only exists while a fight is in progress and is dropped on
//! victory, defeat, or a successful flee.

use std::collections::VecDeque;

use arrayvec::ArrayVec;

use super::{AbilityId, Item};
use crate::config::GameConfig;

/// Special move an enemy can use instead of a plain attack.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ability {
    pub id: AbilityId,
    pub name: String,
    /// Damage added on top of the enemy's base attack.
    #[cfg_attr(feature = "serde", serde(default))]
    pub power: u32,
    /// Energy cost declared by the content source; informational for enemies.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cost: u32,
    pub cooldown: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub current_cooldown: u32,
}

impl Ability {
    pub fn is_ready(&self) -> bool {
        self.current_cooldown == 0
    }
}

/// Experience, credits, and items granted when an enemy is defeated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Rewards {
    pub experience: u32,
    pub credits: u32,
    pub items: Vec<Item>,
}

pub type Abilities = ArrayVec<Ability, { GameConfig::MAX_ABILITIES }>;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enemy {
    pub id: String,
    pub name: String,
    pub level: u32,
    pub health: u32,
    pub max_health: u32,
    pub attack: u32,
    pub defense: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub abilities: Abilities,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rewards: Rewards,
}

impl Enemy {
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let before = self.health;
        self.health = self.health.saturating_sub(amount);
        before - self.health
    }

    pub fn ability(&self, id: &AbilityId) -> Option<&Ability> {
        self.abilities.iter().find(|ability| &ability.id == id)
    }

    pub fn available_abilities(&self) -> impl Iterator<Item = &Ability> {
        self.abilities.iter().filter(|ability| ability.is_ready())
    }

    /// Rejects enemies that cannot take part in a fight.
    pub fn is_well_formed(&self) -> bool {
        !self.name.trim().is_empty() && self.max_health > 0 && self.level > 0
    }
}

/// Live fight between the player and one enemy.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatState {
    pub enemy: Enemy,
    pub round: u32,
    /// Player braced for the next incoming hit.
    pub player_defending: bool,
    /// Enemy braced for the next player hit.
    pub enemy_defending: bool,
    /// Most recent narrative lines, oldest first.
    pub history: VecDeque<String>,
}

impl CombatState {
    pub fn new(enemy: Enemy) -> Self {
        Self {
            enemy,
            round: 1,
            player_defending: false,
            enemy_defending: false,
            history: VecDeque::with_capacity(GameConfig::HISTORY_LEN),
        }
    }

    pub fn record(&mut self, line: impl Into<String>) {
        if self.history.len() == GameConfig::HISTORY_LEN {
            self.history.pop_front();
        }
        self.history.push_back(line.into());
    }
}
