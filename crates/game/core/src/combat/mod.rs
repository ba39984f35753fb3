//! Turn-based combat resolution.
//!
//! A round is one player move followed, if both sides still stand, by one
//! enemy move. The runtime asks the content source for the enemy's move
//! between the two halves; everything here is pure bookkeeping on the session.
//!
//! - [`damage`]: attack and hit formulas
//! - [`enemy_turn`]: applying a generated enemy move, cooldown handling

pub mod damage;
mod enemy_turn;

pub use damage::{enemy_hit_damage, player_attack_damage};
pub use enemy_turn::{EnemyStrike, apply_enemy_move};

use crate::config::GameConfig;
use crate::env::{CombatActionRequest, Dice, PlayerStats, RngOracle, Roll};
use crate::state::{CombatState, Enemy, GamePhase, Rewards, Session};

/// State of the fight after a half-round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CombatOutcome {
    Ongoing,
    Victory,
    Defeat,
}

/// Result of a player attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerHit {
    pub damage: u32,
    pub enemy_health: u32,
}

/// Starts a fight against `enemy` and switches to the combat phase.
pub fn begin(session: &mut Session, enemy: Enemy) {
    session.combat = Some(CombatState::new(enemy));
    session.phase = GamePhase::Combat;
    session.return_phase = None;
}

/// Player numbers forwarded to the enemy-move request.
pub fn player_stats(session: &Session) -> PlayerStats {
    let gear = session.equipment.total();
    PlayerStats {
        level: session.player.level,
        health: session.player.health,
        max_health: session.player.max_health,
        attack_bonus: gear.attack,
        defense_bonus: gear.defense,
    }
}

/// Builds the request for the enemy's next move, if a fight is running.
pub fn combat_action_request(session: &Session) -> Option<CombatActionRequest> {
    let combat = session.combat.as_ref()?;
    Some(CombatActionRequest {
        enemy: combat.enemy.clone(),
        player: player_stats(session),
        round: combat.round,
        recent_history: combat.history.iter().cloned().collect(),
        available_abilities: combat
            .enemy
            .available_abilities()
            .map(|ability| ability.id.clone())
            .collect(),
    })
}

/// Resolves a player attack. The enemy's defensive stance is consumed.
pub fn player_attack<R: RngOracle + ?Sized>(
    session: &mut Session,
    dice: &Dice<'_, R>,
) -> Option<PlayerHit> {
    let level = session.player.level;
    let weapon = session.equipment.weapon_attack();
    let combat = session.combat.as_mut()?;

    let (low, high) = damage::variance_bounds();
    let variance = dice.range(Roll::AttackVariance, low, high);
    let damage = player_attack_damage(
        level,
        weapon,
        combat.enemy.defense,
        variance,
        combat.enemy_defending,
    );
    combat.enemy_defending = false;
    let dealt = combat.enemy.take_damage(damage);
    combat.record(format!("You strike {} for {dealt} damage.", combat.enemy.name));

    Some(PlayerHit {
        damage: dealt,
        enemy_health: combat.enemy.health,
    })
}

/// Braces the player for the next incoming hit.
pub fn player_defend(session: &mut Session) -> bool {
    match session.combat.as_mut() {
        Some(combat) => {
            combat.player_defending = true;
            combat.record("You raise your guard.");
            true
        }
        None => false,
    }
}

/// Rolls a flee attempt.
pub fn flee_succeeds<R: RngOracle + ?Sized>(dice: &Dice<'_, R>) -> bool {
    dice.chance(Roll::Flee, GameConfig::FLEE_CHANCE)
}

/// Leaves combat without rewards.
pub fn disengage(session: &mut Session) {
    session.combat = None;
    session.return_phase = None;
    session.phase = GamePhase::Exploring;
}

/// Checks win/loss. Defeat of the player takes precedence.
pub fn outcome(session: &Session) -> CombatOutcome {
    if !session.player.is_alive() {
        return CombatOutcome::Defeat;
    }
    match &session.combat {
        Some(combat) if !combat.enemy.is_alive() => CombatOutcome::Victory,
        _ => CombatOutcome::Ongoing,
    }
}

/// Ends a won fight: clears combat, returns to exploring, and hands back the
/// defeated enemy with its base rewards.
pub fn conclude_victory(session: &mut Session) -> Option<(Enemy, Rewards)> {
    let mut combat = session.combat.take()?;
    session.phase = GamePhase::Exploring;
    session.return_phase = None;
    let rewards = std::mem::take(&mut combat.enemy.rewards);
    Some((combat.enemy, rewards))
}
