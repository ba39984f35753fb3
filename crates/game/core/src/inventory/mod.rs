//! Inventory and equipment rules.
//!
//! - Consumables stack onto an existing row with the same id and category.
//! - Any acquisition that needs a new row is refused once `max_slots` rows
//!   exist, and the refusal is reported through [`AcquireOutcome`].
//! - Equipment drops go through [`auto_equip`] before touching the inventory.

mod equip;

pub use equip::{EquipOutcome, auto_equip, equip_from_inventory};

use crate::error::{ErrorSeverity, GameError};
use crate::state::{ConsumableEffect, Inventory, Item, ItemId, Session};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InventoryError {
    #[error("item {0} is not in the inventory")]
    ItemNotFound(ItemId),

    #[error("item {0} cannot be used")]
    NotUsable(ItemId),

    #[error("item {0} cannot be equipped")]
    NotEquippable(ItemId),

    #[error("item {0} has an invalid quantity")]
    InvalidQuantity(ItemId),

    #[error("inventory is full ({max_slots} slots), {item} was left behind")]
    CapacityExceeded { item: ItemId, max_slots: usize },
}

impl GameError for InventoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ItemNotFound(_) | Self::NotUsable(_) | Self::NotEquippable(_) => {
                ErrorSeverity::Validation
            }
            Self::InvalidQuantity(_) => ErrorSeverity::Internal,
            Self::CapacityExceeded { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ItemNotFound(_) => "INVENTORY_ITEM_NOT_FOUND",
            Self::NotUsable(_) => "INVENTORY_NOT_USABLE",
            Self::NotEquippable(_) => "INVENTORY_NOT_EQUIPPABLE",
            Self::InvalidQuantity(_) => "INVENTORY_INVALID_QUANTITY",
            Self::CapacityExceeded { .. } => "INVENTORY_CAPACITY_EXCEEDED",
        }
    }
}

/// Result of handing one item to the player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AcquireOutcome {
    /// Added onto an existing consumable stack.
    Stacked { name: String, quantity: u32 },
    /// Stored in a new inventory row.
    Stored { name: String },
    /// Placed into an equipment slot.
    Equipped(EquipOutcome),
    /// Refused; nothing changed.
    Rejected { name: String, error: InventoryError },
}

impl AcquireOutcome {
    /// One-line description for the player.
    pub fn describe(&self) -> String {
        match self {
            Self::Stacked { name, quantity } => format!("{name} added (now x{quantity})."),
            Self::Stored { name } => format!("{name} added to your pack."),
            Self::Equipped(outcome) => outcome.describe(),
            Self::Rejected { error, .. } => format!("{error}."),
        }
    }
}

/// Applied effect of a used consumable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsumableUse {
    pub name: String,
    pub effect: ConsumableEffect,
    /// Amount actually restored after clamping.
    pub restored: u32,
    pub remaining: u32,
}

/// Inserts an item without considering equipment slots.
pub fn store(inventory: &mut Inventory, item: Item) -> Result<AcquireOutcome, InventoryError> {
    if item.quantity == 0 {
        return Err(InventoryError::InvalidQuantity(item.id));
    }

    if item.is_stackable() {
        if let Some(existing) = inventory
            .items
            .iter_mut()
            .find(|row| row.id == item.id && row.category == item.category)
        {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
            return Ok(AcquireOutcome::Stacked {
                name: existing.name.clone(),
                quantity: existing.quantity,
            });
        }
    }

    if inventory.is_full() {
        return Err(InventoryError::CapacityExceeded {
            item: item.id,
            max_slots: inventory.max_slots,
        });
    }

    let name = item.name.clone();
    inventory.items.push(item);
    Ok(AcquireOutcome::Stored { name })
}

/// Gives an item to the player: wearable gear is offered to [`auto_equip`],
/// everything else is stored.
pub fn acquire(session: &mut Session, item: Item) -> AcquireOutcome {
    if item.equipment_stats().is_some() {
        return auto_equip(session, item);
    }

    let name = item.name.clone();
    store(&mut session.inventory, item)
        .unwrap_or_else(|error| AcquireOutcome::Rejected { name, error })
}

/// Removes one unit of an item, dropping the row when it empties.
pub fn take_one(inventory: &mut Inventory, id: &ItemId) -> Result<Item, InventoryError> {
    let index = inventory
        .position(id)
        .ok_or_else(|| InventoryError::ItemNotFound(id.clone()))?;

    let row = &mut inventory.items[index];
    if row.quantity > 1 {
        row.quantity -= 1;
        let mut unit = row.clone();
        unit.quantity = 1;
        Ok(unit)
    } else {
        Ok(inventory.items.remove(index))
    }
}

/// Consumes one unit of a consumable and applies its effect, clamped to the
/// relevant maximum.
pub fn use_consumable(session: &mut Session, id: &ItemId) -> Result<ConsumableUse, InventoryError> {
    let item = session
        .inventory
        .get(id)
        .ok_or_else(|| InventoryError::ItemNotFound(id.clone()))?;
    let effect = item
        .consumable_effect()
        .ok_or_else(|| InventoryError::NotUsable(id.clone()))?;

    let unit = take_one(&mut session.inventory, id)?;
    let restored = match effect {
        ConsumableEffect::Heal(amount) => session.player.heal(amount),
        ConsumableEffect::RestoreEnergy(amount) => session.player.restore_energy(amount),
    };

    Ok(ConsumableUse {
        name: unit.name,
        effect,
        restored,
        remaining: session.inventory.quantity_of(id),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ItemCategory, Rarity};

    fn potion(quantity: u32) -> Item {
        Item::consumable("potion", "Health Potion", ConsumableEffect::Heal(30), quantity)
    }

    fn material(id: &str) -> Item {
        Item {
            id: id.into(),
            name: id.into(),
            category: ItemCategory::Material,
            quantity: 1,
            rarity: Rarity::Common,
            payload: Default::default(),
        }
    }

    #[test]
    fn consumables_with_same_id_stack() {
        let mut inventory = Inventory::new(2);
        store(&mut inventory, potion(1)).unwrap();
        let outcome = store(&mut inventory, potion(2)).unwrap();

        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory.items[0].quantity, 3);
        assert!(matches!(outcome, AcquireOutcome::Stacked { quantity: 3, .. }));
    }

    #[test]
    fn stacking_ignores_capacity() {
        let mut inventory = Inventory::new(1);
        store(&mut inventory, potion(1)).unwrap();
        assert!(store(&mut inventory, potion(1)).is_ok());
        assert_eq!(inventory.items[0].quantity, 2);
    }

    #[test]
    fn new_rows_are_refused_when_full() {
        let mut inventory = Inventory::new(2);
        store(&mut inventory, material("ore")).unwrap();
        store(&mut inventory, material("hide")).unwrap();

        let error = store(&mut inventory, material("bone")).unwrap_err();
        assert!(matches!(error, InventoryError::CapacityExceeded { max_slots: 2, .. }));
        assert_eq!(inventory.len(), 2);
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let mut inventory = Inventory::new(4);
        let error = store(&mut inventory, potion(0)).unwrap_err();
        assert_eq!(error, InventoryError::InvalidQuantity("potion".into()));
        assert!(inventory.is_empty());
    }

    #[test]
    fn take_one_drops_empty_rows() {
        let mut inventory = Inventory::new(4);
        store(&mut inventory, potion(2)).unwrap();
        take_one(&mut inventory, &"potion".into()).unwrap();
        assert_eq!(inventory.items[0].quantity, 1);
        take_one(&mut inventory, &"potion".into()).unwrap();
        assert!(inventory.is_empty());
        assert!(take_one(&mut inventory, &"potion".into()).is_err());
    }
}
