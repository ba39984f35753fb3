//! Equipment slots.
//!
//! Each slot holds at most one [`EquipmentItem`]. Slot contents contribute
//! attack to player hits and defense against enemy hits.

use super::{EquipmentItem, EquipmentSlot, EquipmentStats};

/// Weapon, armor, and accessory slots.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipmentSlots {
    pub weapon: Option<EquipmentItem>,
    pub armor: Option<EquipmentItem>,
    pub accessory: Option<EquipmentItem>,
}

impl EquipmentSlots {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> Option<&EquipmentItem> {
        match slot {
            EquipmentSlot::Weapon => self.weapon.as_ref(),
            EquipmentSlot::Armor => self.armor.as_ref(),
            EquipmentSlot::Accessory => self.accessory.as_ref(),
        }
    }

    fn slot_mut(&mut self, slot: EquipmentSlot) -> &mut Option<EquipmentItem> {
        match slot {
            EquipmentSlot::Weapon => &mut self.weapon,
            EquipmentSlot::Armor => &mut self.armor,
            EquipmentSlot::Accessory => &mut self.accessory,
        }
    }

    /// Puts an item into its slot, returning whatever was there before.
    pub fn replace(&mut self, item: EquipmentItem) -> Option<EquipmentItem> {
        self.slot_mut(item.slot).replace(item)
    }

    /// Power of the item in a slot, `None` when the slot is empty.
    pub fn slot_power(&self, slot: EquipmentSlot) -> Option<u32> {
        self.get(slot).map(EquipmentItem::power)
    }

    /// Sum of the bonuses of every equipped item.
    pub fn total(&self) -> EquipmentStats {
        [&self.weapon, &self.armor, &self.accessory]
            .into_iter()
            .flatten()
            .fold(EquipmentStats::default(), |acc, item| {
                EquipmentStats::new(
                    acc.attack.saturating_add(item.stats.attack),
                    acc.defense.saturating_add(item.stats.defense),
                    acc.health.saturating_add(item.stats.health),
                    acc.energy.saturating_add(item.stats.energy),
                )
            })
    }

    pub fn weapon_attack(&self) -> u32 {
        self.weapon.as_ref().map_or(0, |item| item.stats.attack)
    }

    pub fn armor_defense(&self) -> u32 {
        self.armor.as_ref().map_or(0, |item| item.stats.defense)
    }
}
