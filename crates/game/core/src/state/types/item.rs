//! Item value objects.
//!
//! Items are carried by value inside the inventory, the equipment slots, and
//! reward payloads. The payload depends on the category: consumables carry an
//! effect, wearable gear carries combat stats, everything else carries nothing.

use super::ItemId;

/// Broad item classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ItemCategory {
    Weapon,
    Armor,
    Consumable,
    Accessory,
    KeyItem,
    Material,
}

impl ItemCategory {
    /// Equipment slot this category occupies, if any.
    pub const fn slot(self) -> Option<EquipmentSlot> {
        match self {
            Self::Weapon => Some(EquipmentSlot::Weapon),
            Self::Armor => Some(EquipmentSlot::Armor),
            Self::Accessory => Some(EquipmentSlot::Accessory),
            Self::Consumable | Self::KeyItem | Self::Material => None,
        }
    }
}

/// Rarity tier, ordered from least to most rare.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

/// The three equipment slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EquipmentSlot {
    Weapon,
    Armor,
    Accessory,
}

impl EquipmentSlot {
    pub const fn category(self) -> ItemCategory {
        match self {
            Self::Weapon => ItemCategory::Weapon,
            Self::Armor => ItemCategory::Armor,
            Self::Accessory => ItemCategory::Accessory,
        }
    }
}

/// Bonuses granted by a piece of equipment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EquipmentStats {
    pub attack: u32,
    pub defense: u32,
    pub health: u32,
    pub energy: u32,
}

impl EquipmentStats {
    pub const fn new(attack: u32, defense: u32, health: u32, energy: u32) -> Self {
        Self {
            attack,
            defense,
            health,
            energy,
        }
    }

    /// Scalar used to rank equipment candidates.
    pub const fn power(&self) -> u32 {
        self.attack
            .saturating_add(self.defense)
            .saturating_add(self.health)
            .saturating_add(self.energy)
    }
}

/// Effect applied when a consumable is used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConsumableEffect {
    Heal(u32),
    RestoreEnergy(u32),
}

/// Category-dependent item payload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemPayload {
    #[default]
    None,
    Consumable(ConsumableEffect),
    Equipment(EquipmentStats),
}

/// A stack of identical items.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub category: ItemCategory,
    pub quantity: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rarity: Rarity,
    #[cfg_attr(feature = "serde", serde(default))]
    pub payload: ItemPayload,
}

impl Item {
    pub fn consumable(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        effect: ConsumableEffect,
        quantity: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: ItemCategory::Consumable,
            quantity,
            rarity: Rarity::Common,
            payload: ItemPayload::Consumable(effect),
        }
    }

    pub fn equipment(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        slot: EquipmentSlot,
        stats: EquipmentStats,
        rarity: Rarity,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: slot.category(),
            quantity: 1,
            rarity,
            payload: ItemPayload::Equipment(stats),
        }
    }

    pub fn key(id: impl Into<ItemId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: ItemCategory::KeyItem,
            quantity: 1,
            rarity: Rarity::Uncommon,
            payload: ItemPayload::None,
        }
    }

    pub fn is_stackable(&self) -> bool {
        self.category == ItemCategory::Consumable
    }

    pub fn consumable_effect(&self) -> Option<ConsumableEffect> {
        match (self.category, self.payload) {
            (ItemCategory::Consumable, ItemPayload::Consumable(effect)) => Some(effect),
            _ => None,
        }
    }

    pub fn equipment_stats(&self) -> Option<EquipmentStats> {
        match self.payload {
            ItemPayload::Equipment(stats) if self.category.slot().is_some() => Some(stats),
            _ => None,
        }
    }

    /// Rejects structurally invalid items (blank identity or empty stack).
    pub fn is_well_formed(&self) -> bool {
        !self.id.is_empty() && !self.name.trim().is_empty() && self.quantity >= 1
    }
}

/// An item sitting in an equipment slot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipmentItem {
    pub id: ItemId,
    pub name: String,
    pub slot: EquipmentSlot,
    pub rarity: Rarity,
    pub stats: EquipmentStats,
}

impl EquipmentItem {
    /// Builds an equipment item from an inventory item of a wearable category.
    pub fn from_item(item: &Item) -> Option<Self> {
        let slot = item.category.slot()?;
        let stats = item.equipment_stats()?;
        Some(Self {
            id: item.id.clone(),
            name: item.name.clone(),
            slot,
            rarity: item.rarity,
            stats,
        })
    }

    pub const fn power(&self) -> u32 {
        self.stats.power()
    }

    /// Converts back into an inventory row with its own category.
    pub fn into_item(self) -> Item {
        Item {
            id: self.id,
            name: self.name,
            category: self.slot.category(),
            quantity: 1,
            rarity: self.rarity,
            payload: ItemPayload::Equipment(self.stats),
        }
    }

    /// Converts into a non-usable material row.
    pub fn into_material(self) -> Item {
        Item {
            id: self.id,
            name: self.name,
            category: ItemCategory::Material,
            quantity: 1,
            rarity: self.rarity,
            payload: ItemPayload::None,
        }
    }
}
