//! Arrival encounters, searching, and resting.

use crate::config::GameConfig;
use crate::env::{Dice, LootSource, RngOracle, Roll};
use crate::state::{Area, DangerLevel, Player};

/// What an arrival roll produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encounter {
    Enemy,
    Treasure,
    Nothing,
}

/// What a search produced. Exactly one outcome per search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    Loot(LootSource),
    Enemy,
    Consolation { credits: u32, experience: u32 },
    Nothing,
}

/// Pools restored by resting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Recovery {
    pub health: u32,
    pub energy: u32,
}

/// Extra enemy chance granted by an area's danger category.
pub const fn encounter_bonus(danger: DangerLevel) -> u32 {
    match danger {
        DangerLevel::Safe => 0,
        DangerLevel::Dangerous => GameConfig::DANGEROUS_ENCOUNTER_BONUS,
        DangerLevel::Boss => GameConfig::BOSS_ENCOUNTER_BONUS,
        DangerLevel::Special => GameConfig::SPECIAL_ENCOUNTER_BONUS,
    }
}

fn enemy_chance(area: &Area) -> u32 {
    (area.encounters.enemy + encounter_bonus(area.danger)).min(100)
}

/// Single draw against the boosted enemy chance, then against the cumulative
/// enemy + treasure chance.
pub fn roll_encounter<R: RngOracle + ?Sized>(area: &Area, dice: &Dice<'_, R>) -> Encounter {
    let draw = dice.percentile(Roll::Encounter);
    let enemy = enemy_chance(area);

    if draw < enemy {
        Encounter::Enemy
    } else if draw < enemy + area.encounters.treasure {
        Encounter::Treasure
    } else {
        Encounter::Nothing
    }
}

/// Small reward for a search that found nothing of note.
pub const fn consolation_reward(level: u32) -> (u32, u32) {
    (5 + level * 2, 5)
}

pub fn roll_search<R: RngOracle + ?Sized>(
    area: &Area,
    player_level: u32,
    dice: &Dice<'_, R>,
) -> SearchOutcome {
    if area.danger.is_safe() {
        return if dice.chance(Roll::SafeSearch, GameConfig::SAFE_SEARCH_CHANCE) {
            SearchOutcome::Loot(LootSource::Search)
        } else {
            SearchOutcome::Nothing
        };
    }

    let draw = dice.percentile(Roll::Encounter);
    let enemy = enemy_chance(area);
    if draw < enemy {
        return SearchOutcome::Enemy;
    }
    if draw < enemy + area.encounters.treasure + GameConfig::ACTIVE_SEARCH_BONUS {
        return SearchOutcome::Loot(LootSource::Treasure);
    }

    if dice.chance(Roll::Consolation, GameConfig::CONSOLATION_CHANCE) {
        let (credits, experience) = consolation_reward(player_level);
        SearchOutcome::Consolation {
            credits,
            experience,
        }
    } else {
        SearchOutcome::Nothing
    }
}

/// Restores a share of both pools. Only allowed in safe areas.
pub fn rest(player: &mut Player, danger: DangerLevel) -> Option<Recovery> {
    if !danger.is_safe() {
        return None;
    }
    let health = share(player.max_health, GameConfig::REST_HEALTH_PERCENT);
    let energy = share(player.max_energy, GameConfig::REST_ENERGY_PERCENT);

    Some(Recovery {
        health: player.heal(health),
        energy: player.restore_energy(energy),
    })
}

/// `percent` (at most 100) of `value`, floored.
fn share(value: u32, percent: u32) -> u32 {
    (u64::from(value) * u64::from(percent.min(100)) / 100) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::compute_seed;

    /// Oracle returning a fixed value for every draw.
    struct Fixed(u32);

    impl RngOracle for Fixed {
        fn next_u32(&self, _seed: u64) -> u32 {
            self.0
        }
    }

    fn area(danger: DangerLevel, enemy: u32, treasure: u32) -> Area {
        Area::new("a", "A", danger).with_encounters(enemy, treasure)
    }

    #[test]
    fn danger_boosts_enemy_chance() {
        let rng = Fixed(30);
        let dice = Dice::new(&rng, 0, 0);

        assert_eq!(roll_encounter(&area(DangerLevel::Safe, 20, 0), &dice), Encounter::Nothing);
        assert_eq!(roll_encounter(&area(DangerLevel::Dangerous, 20, 0), &dice), Encounter::Enemy);
        assert_eq!(roll_encounter(&area(DangerLevel::Special, 20, 0), &dice), Encounter::Nothing);
        assert_eq!(roll_encounter(&area(DangerLevel::Boss, 10, 0), &dice), Encounter::Enemy);
    }

    #[test]
    fn treasure_uses_the_same_draw_cumulatively() {
        let rng = Fixed(45);
        let dice = Dice::new(&rng, 0, 0);
        assert_eq!(roll_encounter(&area(DangerLevel::Safe, 40, 10), &dice), Encounter::Treasure);
        assert_eq!(roll_encounter(&area(DangerLevel::Safe, 40, 5), &dice), Encounter::Nothing);
    }

    #[test]
    fn safe_search_finds_moderate_loot() {
        let rng = Fixed(10);
        let dice = Dice::new(&rng, 0, 0);
        assert_eq!(
            roll_search(&area(DangerLevel::Safe, 0, 0), 1, &dice),
            SearchOutcome::Loot(LootSource::Search)
        );
    }

    #[test]
    fn active_search_boosts_treasure() {
        let rng = Fixed(55);
        let dice = Dice::new(&rng, 0, 0);
        // enemy 10 + 15 = 25, treasure 10 + 20 = 30 -> cumulative 55 is a miss.
        let outcome = roll_search(&area(DangerLevel::Dangerous, 10, 10), 3, &dice);
        assert_eq!(outcome, SearchOutcome::Nothing);

        let outcome = roll_search(&area(DangerLevel::Dangerous, 10, 11), 3, &dice);
        assert_eq!(outcome, SearchOutcome::Loot(LootSource::Treasure));
    }

    /// Oracle answering one roll context differently from the rest.
    struct OneRoll {
        seed: u64,
        hit: u32,
        otherwise: u32,
    }

    impl RngOracle for OneRoll {
        fn next_u32(&self, seed: u64) -> u32 {
            if seed == self.seed { self.hit } else { self.otherwise }
        }
    }

    #[test]
    fn failed_dangerous_search_may_still_console() {
        let rng = OneRoll {
            seed: compute_seed(0, 0, Roll::Consolation as u32),
            hit: 10,
            otherwise: 95,
        };
        let dice = Dice::new(&rng, 0, 0);
        assert_eq!(
            roll_search(&area(DangerLevel::Dangerous, 0, 0), 4, &dice),
            SearchOutcome::Consolation {
                credits: 13,
                experience: 5
            }
        );

        let rng = Fixed(95);
        let miss = Dice::new(&rng, 0, 0);
        assert_eq!(
            roll_search(&area(DangerLevel::Dangerous, 0, 0), 4, &miss),
            SearchOutcome::Nothing
        );
    }

    #[test]
    fn safe_search_miss_finds_nothing() {
        let rng = OneRoll {
            seed: compute_seed(0, 0, Roll::Consolation as u32),
            hit: 0,
            otherwise: 95,
        };
        let dice = Dice::new(&rng, 0, 0);
        assert_eq!(roll_search(&area(DangerLevel::Safe, 0, 0), 4, &dice), SearchOutcome::Nothing);
    }

    #[test]
    fn rest_only_in_safe_areas() {
        let mut player = Player::default();
        player.take_damage(90);
        player.energy = 0;

        assert!(rest(&mut player, DangerLevel::Dangerous).is_none());
        let recovery = rest(&mut player, DangerLevel::Safe).unwrap();
        assert_eq!(recovery, Recovery { health: 50, energy: 40 });
        assert!(player.resources_within_bounds());
    }

    #[test]
    fn rest_handles_huge_maximums() {
        let mut player = Player::default();
        player.adjust_maximums(i64::from(u32::MAX), i64::from(u32::MAX));
        player.health = 0;
        player.energy = 0;

        let recovery = rest(&mut player, DangerLevel::Safe).unwrap();
        assert_eq!(recovery.health, u32::MAX / 2);
        assert_eq!(recovery.energy, (u64::from(u32::MAX) * 80 / 100) as u32);
        assert!(player.resources_within_bounds());
    }
}
