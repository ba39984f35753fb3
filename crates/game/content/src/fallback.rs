//! Deterministic fallback content.
//!
//! Used whenever the content generator fails, times out, or returns
//! something unusable. Numbers follow fixed formulas so a session driven
//! purely by fallbacks stays playable and balanced.

use rpg_core::{
    Area, AreaRequest, CombatActionRequest, ContentOracle, DangerLevel, Direction, Enemy,
    EnemyRequest, EquipmentSlot, Exit, GeneratedCombatAction, Item, Loot, LootRequest, LootSource,
    Quest, Rarity, Rewards, StoryEvent, StoryEventRequest,
};

use crate::catalog::{StoryCatalog, interlude};
use crate::starter;

/// Enemy chance of a synthesized area.
pub const FALLBACK_AREA_ENEMY_CHANCE: u32 = 30;

#[derive(Clone, Debug)]
pub struct FallbackContent {
    catalog: StoryCatalog,
}

impl Default for FallbackContent {
    fn default() -> Self {
        Self::new()
    }
}

impl FallbackContent {
    pub fn new() -> Self {
        Self {
            catalog: StoryCatalog::builtin(),
        }
    }

    /// Replaces built-in story events with operator-supplied ones.
    pub fn with_catalog(catalog: StoryCatalog) -> Self {
        Self {
            catalog: StoryCatalog::builtin().merged(catalog),
        }
    }

    pub fn catalog(&self) -> &StoryCatalog {
        &self.catalog
    }
}

/// Enemy stats used when generation fails:
/// health = level × 20, attack = level × 3 + 5, defense = level × 2.
pub fn fallback_enemy(level: u32, danger: DangerLevel) -> Enemy {
    let level = level.max(1);
    let health = level * 20;
    Enemy {
        id: format!("fallback_{danger}"),
        name: enemy_name(danger).to_string(),
        level,
        health,
        max_health: health,
        attack: level * 3 + 5,
        defense: level * 2,
        abilities: Default::default(),
        rewards: Rewards {
            experience: level * 25,
            credits: level * 10,
            items: Vec::new(),
        },
    }
}

fn enemy_name(danger: DangerLevel) -> &'static str {
    match danger {
        DangerLevel::Safe => "Stray Wolf",
        DangerLevel::Dangerous => "Shadow Stalker",
        DangerLevel::Boss => "Ancient Warden",
        DangerLevel::Special => "Arcane Wisp",
    }
}

impl ContentOracle for FallbackContent {
    fn starting_area(&self) -> Area {
        starter::starting_area()
    }

    fn starting_items(&self) -> Vec<Item> {
        starter::starting_items()
    }

    fn starting_quests(&self) -> Vec<Quest> {
        vec![starter::first_steps()]
    }

    /// A dangerous clearing with a single way back.
    fn area(&self, request: &AreaRequest) -> Area {
        let back = request.direction.map_or(Direction::South, Direction::opposite);
        Area::new(request.target_area.clone(), "Uncharted Clearing", DangerLevel::Dangerous)
            .with_description("Mist hides the edges of this place. Something moves in the brush.")
            .with_exit(Exit::open(back, request.current_area.clone()))
            .with_encounters(FALLBACK_AREA_ENEMY_CHANCE, 0)
    }

    fn enemy(&self, request: &EnemyRequest) -> Enemy {
        fallback_enemy(request.player_level, request.danger)
    }

    fn combat_action(&self, request: &CombatActionRequest) -> GeneratedCombatAction {
        GeneratedCombatAction::attack(format!("{} lunges at you.", request.enemy.name))
    }

    fn loot(&self, request: &LootRequest) -> Loot {
        let level = request.player_level.max(1);
        match request.source {
            LootSource::Combat => Loot {
                items: Vec::new(),
                credits: level * 5,
                experience: level * 5,
                narrative: "You pick through what the fight left behind.".into(),
            },
            LootSource::Search => Loot {
                items: vec![starter::health_potion(1)],
                credits: 10 + level * 3,
                experience: 10,
                narrative: "Tucked behind a loose stone you find a small cache.".into(),
            },
            LootSource::Treasure => {
                let mut items = vec![starter::gear(slot_for(level), level, Rarity::Common)];
                if matches!(request.danger, DangerLevel::Boss | DangerLevel::Special) {
                    items.push(starter::cellar_key());
                }
                Loot {
                    items,
                    credits: 20 + level * 5,
                    experience: 15,
                    narrative: "A weathered chest creaks open.".into(),
                }
            }
        }
    }

    fn story_event(&self, request: &StoryEventRequest) -> StoryEvent {
        self.catalog
            .get(&request.event_id)
            .cloned()
            .unwrap_or_else(|| interlude(request.event_id.clone()))
    }
}

fn slot_for(level: u32) -> EquipmentSlot {
    match level % 3 {
        0 => EquipmentSlot::Accessory,
        1 => EquipmentSlot::Weapon,
        _ => EquipmentSlot::Armor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpg_core::Difficulty;

    fn area_request(direction: Option<Direction>) -> AreaRequest {
        AreaRequest {
            current_area: "town_square".into(),
            target_area: "whispering_woods".into(),
            player_level: 1,
            story_progress: 0,
            explored_areas: vec!["town_square".into()],
            direction,
            seed: 9,
        }
    }

    #[test]
    fn enemy_follows_the_fallback_formula() {
        let enemy = FallbackContent::new().enemy(&EnemyRequest {
            player_level: 4,
            danger: DangerLevel::Boss,
            story_progress: 40,
            difficulty: Difficulty::Hard,
            area_name: "Crypt".into(),
            seed: 1,
        });
        assert_eq!(enemy.health, 80);
        assert_eq!(enemy.max_health, 80);
        assert_eq!(enemy.attack, 17);
        assert_eq!(enemy.defense, 8);
        assert!(enemy.is_well_formed());
    }

    #[test]
    fn area_has_one_return_exit() {
        let area = FallbackContent::new().area(&area_request(Some(Direction::North)));
        assert_eq!(area.danger, DangerLevel::Dangerous);
        assert_eq!(area.exits.len(), 1);
        let back = &area.exits[0];
        assert_eq!(back.direction, Direction::South);
        assert_eq!(back.target.as_str(), "town_square");
        assert!(!back.locked);
        assert_eq!(area.encounters.enemy, FALLBACK_AREA_ENEMY_CHANCE);
    }

    #[test]
    fn same_request_same_content() {
        let content = FallbackContent::new();
        let request = area_request(None);
        assert_eq!(content.area(&request), content.area(&request));
    }

    #[test]
    fn loot_ignores_the_seed() {
        let content = FallbackContent::new();
        let request = |danger, seed| LootRequest {
            player_level: 3,
            danger,
            source: LootSource::Treasure,
            difficulty: Difficulty::Normal,
            seed,
        };

        for danger in [DangerLevel::Dangerous, DangerLevel::Boss] {
            assert_eq!(content.loot(&request(danger, 0)), content.loot(&request(danger, 7)));
        }
        let boss = content.loot(&request(DangerLevel::Boss, 3));
        assert!(boss.items.iter().any(|item| item.id.as_str() == starter::CELLAR_KEY));
        let dangerous = content.loot(&request(DangerLevel::Dangerous, 5));
        assert!(dangerous.items.iter().all(|item| item.id.as_str() != starter::CELLAR_KEY));
    }

    #[test]
    fn unknown_event_ids_get_an_interlude() {
        let event = FallbackContent::new().story_event(&StoryEventRequest {
            event_id: "side_quest".into(),
            current_area: "town_square".into(),
            player_level: 1,
            story_progress: 10,
            completed_events: Vec::new(),
            recent_actions: Vec::new(),
            finale: false,
            seed: 0,
        });
        assert_eq!(event.id.as_str(), "side_quest");
        assert!(event.is_well_formed());
    }

    #[test]
    fn combat_action_is_a_plain_attack() {
        let content = FallbackContent::new();
        let action = content.combat_action(&CombatActionRequest {
            enemy: fallback_enemy(2, DangerLevel::Safe),
            player: rpg_core::PlayerStats {
                level: 2,
                health: 50,
                max_health: 110,
                attack_bonus: 0,
                defense_bonus: 0,
            },
            round: 1,
            recent_history: Vec::new(),
            available_abilities: Vec::new(),
        });
        assert_eq!(action.action, rpg_core::EnemyMove::Attack);
        assert_eq!(action.damage, None);
    }
}
