//! Player resource pools.
//!
//! Every mutator clamps, so `health <= max_health` and `energy <= max_energy`
//! hold no matter what deltas the rules feed in.

use crate::config::GameConfig;

/// Player character stats.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub level: u32,
    pub experience: u32,
    pub experience_to_next: u32,
    pub health: u32,
    pub max_health: u32,
    pub energy: u32,
    pub max_energy: u32,
    pub credits: u32,
}

impl Player {
    /// Creates a level-1 player with full resources.
    pub fn new(starting_credits: u32) -> Self {
        Self {
            level: 1,
            experience: 0,
            experience_to_next: GameConfig::EXPERIENCE_PER_LEVEL,
            health: GameConfig::STARTING_HEALTH,
            max_health: GameConfig::STARTING_HEALTH,
            energy: GameConfig::STARTING_ENERGY,
            max_energy: GameConfig::STARTING_ENERGY,
            credits: starting_credits,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Restores health, returning the amount actually gained.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.health;
        self.health = self.health.saturating_add(amount).min(self.max_health);
        self.health - before
    }

    /// Restores energy, returning the amount actually gained.
    pub fn restore_energy(&mut self, amount: u32) -> u32 {
        let before = self.energy;
        self.energy = self.energy.saturating_add(amount).min(self.max_energy);
        self.energy - before
    }

    /// Applies damage, returning the amount actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let before = self.health;
        self.health = self.health.saturating_sub(amount);
        before - self.health
    }

    pub fn add_credits(&mut self, amount: u32) {
        self.credits = self.credits.saturating_add(amount);
    }

    /// Removes credits if the balance covers them; otherwise leaves the balance untouched.
    pub fn spend_credits(&mut self, amount: u32) -> bool {
        match self.credits.checked_sub(amount) {
            Some(remaining) => {
                self.credits = remaining;
                true
            }
            None => false,
        }
    }

    /// Applies a signed credit delta, flooring the balance at zero.
    pub fn adjust_credits(&mut self, delta: i32) {
        if delta >= 0 {
            self.add_credits(delta.unsigned_abs());
        } else {
            self.credits = self.credits.saturating_sub(delta.unsigned_abs());
        }
    }

    /// Shifts both maximums by signed deltas and clamps the current pools.
    pub fn adjust_maximums(&mut self, health_delta: i64, energy_delta: i64) {
        self.max_health = shift(self.max_health, health_delta).max(1);
        self.max_energy = shift(self.max_energy, energy_delta);
        self.health = self.health.min(self.max_health);
        self.energy = self.energy.min(self.max_energy);
    }

    pub fn restore_fully(&mut self) {
        self.health = self.max_health;
        self.energy = self.max_energy;
    }

    pub fn resources_within_bounds(&self) -> bool {
        self.health <= self.max_health && self.energy <= self.max_energy
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(GameConfig::DEFAULT_STARTING_CREDITS)
    }
}

fn shift(value: u32, delta: i64) -> u32 {
    (i64::from(value) + delta).clamp(0, i64::from(u32::MAX)) as u32
}
