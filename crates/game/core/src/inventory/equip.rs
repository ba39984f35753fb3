use crate::state::{EquipmentItem, EquipmentSlot, Item, ItemId, Player, Session};

use super::{AcquireOutcome, InventoryError, store, take_one};

/// What happened when an item went into an equipment slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EquipOutcome {
    pub slot: EquipmentSlot,
    pub equipped: String,
    /// Name of the item that was in the slot before, if any.
    pub displaced: Option<String>,
    /// Set when the displaced item did not fit back into the inventory.
    pub displaced_lost: bool,
}

impl EquipOutcome {
    pub fn describe(&self) -> String {
        match (&self.displaced, self.displaced_lost) {
            (None, _) => format!("Equipped {}.", self.equipped),
            (Some(old), false) => format!("Equipped {}, stowing {old}.", self.equipped),
            (Some(old), true) => {
                format!("Equipped {}; no room left for {old}, so it was discarded.", self.equipped)
            }
        }
    }
}

/// Equips freshly acquired gear when the slot is empty or the new piece is
/// strictly stronger. A displaced piece is kept as a material; weaker gear
/// goes into the inventory.
pub fn auto_equip(session: &mut Session, item: Item) -> AcquireOutcome {
    let name = item.name.clone();
    if item.quantity == 0 {
        return AcquireOutcome::Rejected {
            name,
            error: InventoryError::InvalidQuantity(item.id),
        };
    }
    let Some(candidate) = EquipmentItem::from_item(&item) else {
        return store(&mut session.inventory, item)
            .unwrap_or_else(|error| AcquireOutcome::Rejected { name, error });
    };

    match session.equipment.slot_power(candidate.slot) {
        Some(current) if candidate.power() <= current => store(&mut session.inventory, item)
            .unwrap_or_else(|error| AcquireOutcome::Rejected { name, error }),
        _ => {
            let slot = candidate.slot;
            let displaced = put_on(session, candidate);
            let (displaced, displaced_lost) = match displaced {
                Some(old) => {
                    let old_name = old.name.clone();
                    let lost = store(&mut session.inventory, old.into_material()).is_err();
                    (Some(old_name), lost)
                }
                None => (None, false),
            };
            AcquireOutcome::Equipped(EquipOutcome {
                slot,
                equipped: name,
                displaced,
                displaced_lost,
            })
        }
    }
}

/// Equips an item the player already carries. The displaced piece returns to
/// the inventory with its own category so it can be worn again later.
pub fn equip_from_inventory(
    session: &mut Session,
    id: &ItemId,
) -> Result<EquipOutcome, InventoryError> {
    let item = session
        .inventory
        .get(id)
        .ok_or_else(|| InventoryError::ItemNotFound(id.clone()))?;
    let candidate =
        EquipmentItem::from_item(item).ok_or_else(|| InventoryError::NotEquippable(id.clone()))?;

    take_one(&mut session.inventory, id)?;
    let slot = candidate.slot;
    let equipped = candidate.name.clone();
    let displaced = put_on(session, candidate);

    let displaced = match displaced {
        Some(old) => {
            let old_name = old.name.clone();
            store(&mut session.inventory, old.into_item())?;
            Some(old_name)
        }
        None => None,
    };

    Ok(EquipOutcome {
        slot,
        equipped,
        displaced,
        displaced_lost: false,
    })
}

/// Swaps `item` into its slot and applies the difference in pool bonuses.
fn put_on(session: &mut Session, item: EquipmentItem) -> Option<EquipmentItem> {
    let incoming = item.stats;
    let displaced = session.equipment.replace(item);
    let outgoing = displaced.as_ref().map(|old| old.stats).unwrap_or_default();
    apply_bonus_delta(
        &mut session.player,
        i64::from(incoming.health) - i64::from(outgoing.health),
        i64::from(incoming.energy) - i64::from(outgoing.energy),
    );
    displaced
}

fn apply_bonus_delta(player: &mut Player, health: i64, energy: i64) {
    if health != 0 || energy != 0 {
        player.adjust_maximums(health, energy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::state::{Area, DangerLevel, EquipmentStats, ItemCategory, Rarity, SessionSeed};

    fn session(slots: usize) -> Session {
        let config = GameConfig::default().with_max_inventory_slots(slots);
        Session::new(
            SessionSeed {
                id: "s".into(),
                host: "p".into(),
                seed: 1,
                created_at: 0,
                difficulty: Default::default(),
                starting_area: Area::new("start", "Start", DangerLevel::Safe),
                starting_items: Vec::new(),
                quests: Vec::new(),
            },
            &config,
        )
    }

    fn sword(id: &str, attack: u32) -> Item {
        Item::equipment(
            id,
            id,
            EquipmentSlot::Weapon,
            EquipmentStats::new(attack, 0, 0, 0),
            Rarity::Common,
        )
    }

    #[test]
    fn empty_slot_is_filled() {
        let mut session = session(4);
        let outcome = auto_equip(&mut session, sword("rusty", 3));

        assert!(matches!(outcome, AcquireOutcome::Equipped(EquipOutcome { displaced: None, .. })));
        assert_eq!(session.equipment.weapon_attack(), 3);
        assert!(session.inventory.is_empty());
    }

    #[test]
    fn stronger_gear_displaces_into_material() {
        let mut session = session(4);
        auto_equip(&mut session, sword("rusty", 3));
        auto_equip(&mut session, sword("steel", 7));

        assert_eq!(session.equipment.weapon_attack(), 7);
        assert_eq!(session.inventory.len(), 1);
        assert_eq!(session.inventory.items[0].category, ItemCategory::Material);
        assert_eq!(session.inventory.items[0].id.as_str(), "rusty");
    }

    #[test]
    fn equal_or_weaker_gear_is_stored() {
        let mut session = session(4);
        auto_equip(&mut session, sword("steel", 7));
        auto_equip(&mut session, sword("twin", 7));
        auto_equip(&mut session, sword("stick", 1));

        assert_eq!(session.equipment.weapon.as_ref().map(|w| w.id.as_str()), Some("steel"));
        assert_eq!(session.inventory.len(), 2);
        assert!(session.inventory.items.iter().all(|i| i.category == ItemCategory::Weapon));
    }

    #[test]
    fn manual_equip_returns_displaced_with_own_category() {
        let mut session = session(4);
        auto_equip(&mut session, sword("steel", 7));
        auto_equip(&mut session, sword("stick", 1));

        let outcome = equip_from_inventory(&mut session, &"stick".into()).unwrap();
        assert_eq!(outcome.displaced.as_deref(), Some("steel"));
        assert_eq!(session.equipment.weapon_attack(), 1);
        assert_eq!(session.inventory.items[0].category, ItemCategory::Weapon);
    }

    #[test]
    fn health_bonus_shifts_maximum() {
        let mut session = session(4);
        let vest = Item::equipment(
            "vest",
            "Padded Vest",
            EquipmentSlot::Armor,
            EquipmentStats::new(0, 2, 20, 0),
            Rarity::Common,
        );
        auto_equip(&mut session, vest);
        assert_eq!(session.player.max_health, GameConfig::STARTING_HEALTH + 20);
        assert!(session.player.resources_within_bounds());
    }

    #[test]
    fn consumables_cannot_be_equipped() {
        let mut session = session(4);
        session.inventory.items.push(Item::consumable(
            "potion",
            "Potion",
            crate::state::ConsumableEffect::Heal(10),
            1,
        ));
        let error = equip_from_inventory(&mut session, &"potion".into()).unwrap_err();
        assert_eq!(error, InventoryError::NotEquippable("potion".into()));
    }
}
