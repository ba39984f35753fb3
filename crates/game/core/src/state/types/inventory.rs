//! Inventory storage.
//!
//! Rows are kept in acquisition order. The row count is bounded by
//! `max_slots`, checked whenever a new row would be created.

use super::{Item, ItemCategory, ItemId};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    pub items: Vec<Item>,
    pub max_slots: usize,
}

impl Inventory {
    pub fn new(max_slots: usize) -> Self {
        Self {
            items: Vec::new(),
            max_slots,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.max_slots
    }

    pub fn free_slots(&self) -> usize {
        self.max_slots.saturating_sub(self.items.len())
    }

    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn position(&self, id: &ItemId) -> Option<usize> {
        self.items.iter().position(|item| &item.id == id)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.get(id).is_some()
    }

    /// Total units of an item across all rows.
    pub fn quantity_of(&self, id: &ItemId) -> u32 {
        self.items
            .iter()
            .filter(|item| &item.id == id)
            .map(|item| item.quantity)
            .sum()
    }

    pub fn consumables(&self) -> impl Iterator<Item = &Item> {
        self.items
            .iter()
            .filter(|item| item.category == ItemCategory::Consumable)
    }

    pub fn equippable(&self) -> impl Iterator<Item = &Item> {
        self.items
            .iter()
            .filter(|item| item.equipment_stats().is_some())
    }
}
