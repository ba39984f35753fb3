//! Fixed content every session starts from: the hub area, the starter kit,
//! and the introductory quest.

use rpg_core::{
    Area, ConsumableEffect, DangerLevel, Direction, EquipmentSlot, EquipmentStats, Exit, Item,
    Objective, ObjectiveTarget, Quest, Rarity,
};

pub const STARTING_AREA: &str = "town_square";
pub const HEALTH_POTION: &str = "health_potion";
pub const ENERGY_TONIC: &str = "energy_tonic";
pub const CELLAR_KEY: &str = "cellar_key";

pub const HEALTH_POTION_HEAL: u32 = 30;
pub const ENERGY_TONIC_RESTORE: u32 = 20;

pub fn health_potion(quantity: u32) -> Item {
    Item::consumable(
        HEALTH_POTION,
        "Health Potion",
        ConsumableEffect::Heal(HEALTH_POTION_HEAL),
        quantity,
    )
}

pub fn energy_tonic(quantity: u32) -> Item {
    Item::consumable(
        ENERGY_TONIC,
        "Energy Tonic",
        ConsumableEffect::RestoreEnergy(ENERGY_TONIC_RESTORE),
        quantity,
    )
}

pub fn cellar_key() -> Item {
    Item::key(CELLAR_KEY, "Cellar Key")
}

/// Level-scaled piece of gear for `slot`.
pub fn gear(slot: EquipmentSlot, level: u32, rarity: Rarity) -> Item {
    let tier = level.max(1) + rarity as u32;
    let (id, name, stats) = match slot {
        EquipmentSlot::Weapon => (
            format!("blade_t{tier}"),
            format!("{} Blade", tier_name(rarity)),
            EquipmentStats::new(2 + tier * 2, 0, 0, 0),
        ),
        EquipmentSlot::Armor => (
            format!("mail_t{tier}"),
            format!("{} Mail", tier_name(rarity)),
            EquipmentStats::new(0, 2 + tier * 2, tier * 3, 0),
        ),
        EquipmentSlot::Accessory => (
            format!("charm_t{tier}"),
            format!("{} Charm", tier_name(rarity)),
            EquipmentStats::new(tier, tier, 0, tier * 2),
        ),
    };
    Item::equipment(id, name, slot, stats, rarity)
}

fn tier_name(rarity: Rarity) -> &'static str {
    match rarity {
        Rarity::Common => "Worn",
        Rarity::Uncommon => "Sturdy",
        Rarity::Rare => "Fine",
        Rarity::Epic => "Runed",
        Rarity::Legendary => "Mythic",
    }
}

pub fn starting_area() -> Area {
    Area::new(STARTING_AREA, "Town Square", DangerLevel::Safe)
        .with_description(
            "Lanterns sway above the cobbles. Roads lead north into the woods and east \
             to the old market; a cellar door is bolted shut beneath the well.",
        )
        .with_exit(Exit::open(Direction::North, "whispering_woods"))
        .with_exit(Exit::open(Direction::East, "old_market"))
        .with_exit(Exit::locked(Direction::Down, "sealed_cellar", CELLAR_KEY))
        .with_encounters(0, 5)
}

pub fn starting_items() -> Vec<Item> {
    vec![health_potion(2)]
}

pub fn first_steps() -> Quest {
    Quest {
        id: "first_steps".into(),
        title: "First Steps".into(),
        objectives: vec![
            Objective {
                description: "Discover three new areas".into(),
                target: ObjectiveTarget::AnyArea,
                required: 3,
                current: 0,
            },
            Objective {
                description: "Defeat an enemy".into(),
                target: ObjectiveTarget::AnyEnemy,
                required: 1,
                current: 0,
            },
        ],
        reward_credits: 50,
        reward_experience: 50,
        completed: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starter_kit_is_two_potions() {
        let items = starting_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].consumable_effect(), Some(ConsumableEffect::Heal(30)));
    }

    #[test]
    fn gear_power_grows_with_rarity() {
        let common = gear(EquipmentSlot::Weapon, 3, Rarity::Common);
        let epic = gear(EquipmentSlot::Weapon, 3, Rarity::Epic);
        let power = |item: &Item| item.equipment_stats().map_or(0, |s| s.power());
        assert!(power(&epic) > power(&common));
    }

    #[test]
    fn hub_area_is_safe_with_a_locked_cellar() {
        let area = starting_area();
        assert!(area.danger.is_safe());
        let cellar = area.exit(Direction::Down).unwrap();
        assert!(cellar.locked);
        assert_eq!(cellar.required_item.as_ref().map(|k| k.as_str()), Some(CELLAR_KEY));
    }
}
