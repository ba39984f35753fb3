//! Seeded procedural content.
//!
//! Stands in for a narrative generator when none is configured: every answer
//! is derived from the request seed through the core PCG oracle, so runs are
//! reproducible but varied. Story events come from the same catalog the
//! fallback uses.

use rpg_core::{
    Ability, Abilities, Area, AreaRequest, CombatActionRequest, ContentOracle, DangerLevel,
    Difficulty, Direction, EnemyMove, Enemy, EnemyRequest, EquipmentSlot, Exit,
    GeneratedCombatAction, Item, Loot, LootRequest, LootSource, PcgRng, Quest, Rarity, Rewards,
    RngOracle, StoryEvent, StoryEventRequest, compute_seed,
};

use crate::catalog::{StoryCatalog, interlude};
use crate::starter;

const PLACES: [&str; 8] = [
    "Hollow", "Ridge", "Marsh", "Ruins", "Grove", "Cavern", "Causeway", "Barrow",
];
const MOODS: [&str; 8] = [
    "Silent", "Ashen", "Drowned", "Gilded", "Thorned", "Moonlit", "Broken", "Whispering",
];
const FOES: [&str; 6] = ["Ghoul", "Bandit", "Spider", "Golem", "Wraith", "Raider"];

/// Independent draws from one request seed.
struct Draws {
    seed: u64,
    next: u64,
}

impl Draws {
    fn new(seed: u64) -> Self {
        Self { seed, next: 0 }
    }

    fn range(&mut self, min: u32, max: u32) -> u32 {
        self.next += 1;
        PcgRng.range(compute_seed(self.seed, self.next, 0), min, max)
    }

    fn percentile(&mut self) -> u32 {
        self.range(0, 99)
    }

    fn pick<'a, T>(&mut self, options: &'a [T]) -> &'a T {
        let index = self.range(0, options.len() as u32 - 1) as usize;
        &options[index]
    }
}

#[derive(Clone, Debug)]
pub struct ProceduralContent {
    catalog: StoryCatalog,
}

impl Default for ProceduralContent {
    fn default() -> Self {
        Self::new()
    }
}

impl ProceduralContent {
    pub fn new() -> Self {
        Self {
            catalog: StoryCatalog::builtin(),
        }
    }

    pub fn with_catalog(catalog: StoryCatalog) -> Self {
        Self {
            catalog: StoryCatalog::builtin().merged(catalog),
        }
    }
}

fn danger_for(progress: u8, draw: u32) -> DangerLevel {
    let boss_window = u32::from(progress) / 10;
    match draw {
        d if d < boss_window => DangerLevel::Boss,
        d if d < boss_window + 8 => DangerLevel::Special,
        d if d < 55 => DangerLevel::Dangerous,
        _ => DangerLevel::Safe,
    }
}

fn difficulty_percent(difficulty: Difficulty) -> u32 {
    match difficulty {
        Difficulty::Easy => 80,
        Difficulty::Normal => 100,
        Difficulty::Hard => 125,
    }
}

fn scaled(value: u32, percent: u32) -> u32 {
    u32::try_from(u64::from(value) * u64::from(percent) / 100).unwrap_or(u32::MAX)
}

fn rarity_for(draw: u32) -> Rarity {
    match draw {
        0..=49 => Rarity::Common,
        50..=79 => Rarity::Uncommon,
        80..=93 => Rarity::Rare,
        94..=98 => Rarity::Epic,
        _ => Rarity::Legendary,
    }
}

impl ContentOracle for ProceduralContent {
    fn starting_area(&self) -> Area {
        starter::starting_area()
    }

    fn starting_items(&self) -> Vec<Item> {
        starter::starting_items()
    }

    fn starting_quests(&self) -> Vec<Quest> {
        vec![starter::first_steps()]
    }

    fn area(&self, request: &AreaRequest) -> Area {
        let mut draws = Draws::new(request.seed);
        let name = format!("{} {}", draws.pick(&MOODS), draws.pick(&PLACES));
        let danger = danger_for(request.story_progress, draws.percentile());

        let back = request.direction.map(Direction::opposite);
        let mut area = Area::new(request.target_area.clone(), name, danger)
            .with_description(format!(
                "You are {} steps from where you began.",
                request.explored_areas.len()
            ))
            .with_encounters(draws.range(10, 40), draws.range(5, 25));
        if let Some(back) = back {
            area = area.with_exit(Exit::open(back, request.current_area.clone()));
        }

        let onward = draws.range(1, 3);
        let mut locked_one = false;
        for direction in Direction::ALL {
            if area.exits.len() as u32 > onward || Some(direction) == back {
                continue;
            }
            if draws.percentile() >= 50 {
                continue;
            }
            let target = format!("{}_{}", request.target_area, direction);
            let exit = if !locked_one && draws.percentile() < 10 {
                locked_one = true;
                Exit::locked(direction, target, starter::CELLAR_KEY)
            } else {
                Exit::open(direction, target)
            };
            area = area.with_exit(exit);
        }
        area
    }

    fn enemy(&self, request: &EnemyRequest) -> Enemy {
        let mut draws = Draws::new(request.seed);
        let level = request.player_level.max(1);
        let scale = difficulty_percent(request.difficulty);
        let danger_bonus = match request.danger {
            DangerLevel::Safe => 0,
            DangerLevel::Dangerous | DangerLevel::Special => 1,
            DangerLevel::Boss => 3,
        };
        let enemy_level = level + danger_bonus;
        let health = scaled(enemy_level * 18 + draws.range(0, enemy_level * 8), scale);

        let mut abilities = Abilities::new();
        if !request.danger.is_safe() {
            abilities.push(Ability {
                id: "rending_strike".into(),
                name: "Rending Strike".into(),
                power: enemy_level * 2,
                cost: 0,
                cooldown: 3,
                current_cooldown: 0,
            });
        }

        Enemy {
            id: format!("{}_{}", request.danger, draws.range(0, 9_999)),
            name: format!("{} {}", request.area_name, draws.pick(&FOES)),
            level: enemy_level,
            health: health.max(1),
            max_health: health.max(1),
            attack: scaled(enemy_level * 3 + draws.range(2, 6), scale),
            defense: enemy_level * 2,
            abilities,
            rewards: Rewards {
                experience: enemy_level * draws.range(20, 35),
                credits: enemy_level * draws.range(8, 15),
                items: Vec::new(),
            },
        }
    }

    fn combat_action(&self, request: &CombatActionRequest) -> GeneratedCombatAction {
        let seed = u64::from(request.round) ^ u64::from(request.enemy.health) << 16;
        let mut draws = Draws::new(seed);
        let roll = draws.percentile();

        if let Some(ability) = request.available_abilities.first().filter(|_| roll < 35) {
            return GeneratedCombatAction {
                action: EnemyMove::Ability,
                ability: Some(ability.clone()),
                damage: None,
                narrative: String::new(),
            };
        }
        if roll >= 85 && request.enemy.health < request.enemy.max_health / 2 {
            return GeneratedCombatAction {
                action: EnemyMove::Defend,
                ability: None,
                damage: None,
                narrative: String::new(),
            };
        }
        GeneratedCombatAction::attack("")
    }

    fn loot(&self, request: &LootRequest) -> Loot {
        let mut draws = Draws::new(request.seed);
        let level = request.player_level.max(1);
        let mut items = Vec::new();

        let (credits, experience, gear_chance) = match request.source {
            LootSource::Combat => (draws.range(2, 6) * level, draws.range(2, 6) * level, 25),
            LootSource::Search => (draws.range(8, 15) + level * 2, 10, 20),
            LootSource::Treasure => (draws.range(15, 30) + level * 5, 15, 60),
        };

        if draws.percentile() < gear_chance {
            let slot = *draws.pick(&[
                EquipmentSlot::Weapon,
                EquipmentSlot::Armor,
                EquipmentSlot::Accessory,
            ]);
            items.push(starter::gear(slot, level, rarity_for(draws.percentile())));
        }
        match draws.percentile() {
            0..=39 => items.push(starter::health_potion(1)),
            40..=59 => items.push(starter::energy_tonic(1)),
            _ => {}
        }
        if request.source == LootSource::Treasure && draws.percentile() < 15 {
            items.push(starter::cellar_key());
        }

        Loot {
            items,
            credits,
            experience,
            narrative: String::new(),
        }
    }

    fn story_event(&self, request: &StoryEventRequest) -> StoryEvent {
        self.catalog
            .get(&request.event_id)
            .cloned()
            .unwrap_or_else(|| interlude(request.event_id.clone()))
    }
}
