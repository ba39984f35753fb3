//! Damage formulas.

use crate::config::GameConfig;

/// Damage dealt by a player attack.
///
/// # Formula
///
/// ```text
/// base    = 10 + weapon_attack + floor(level / 2)
/// varied  = base * variance_percent / 100        (variance in 70..=130)
/// reduced = max(varied - floor(enemy_defense / 2), 1)
/// final   = enemy_defending ? max(reduced / 2, 1) : reduced
/// ```
pub fn player_attack_damage(
    level: u32,
    weapon_attack: u32,
    enemy_defense: u32,
    variance_percent: u32,
    enemy_defending: bool,
) -> u32 {
    let base = u64::from(GameConfig::BASE_ATTACK_DAMAGE)
        + u64::from(weapon_attack)
        + u64::from(level / 2);
    let varied = saturate(base * u64::from(variance_percent) / 100);
    let reduced = varied.saturating_sub(enemy_defense / 2).max(1);
    halve_if(reduced, enemy_defending)
}

/// Damage taken from an enemy hit after armor and stance.
pub fn enemy_hit_damage(raw: u32, armor_defense: u32, player_defending: bool) -> u32 {
    let reduced = raw.saturating_sub(armor_defense / 2).max(1);
    halve_if(reduced, player_defending)
}

/// Inclusive variance bounds applied to player attacks.
pub const fn variance_bounds() -> (u32, u32) {
    (
        100 - GameConfig::DAMAGE_VARIANCE_PERCENT,
        100 + GameConfig::DAMAGE_VARIANCE_PERCENT,
    )
}

fn saturate(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

fn halve_if(damage: u32, braced: bool) -> u32 {
    if braced { (damage / 2).max(1) } else { damage }
}
