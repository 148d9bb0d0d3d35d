//! A single addressable container cell.

use serde::{Deserialize, Serialize};

use slotsort_core::{ItemHandle, RuleId};

use crate::config::InventoryType;

/// Position of a slot within a set of grids sorted together.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotAddress {
    pub grid: usize,
    pub position: usize,
}

impl SlotAddress {
    pub fn new(grid: usize, position: usize) -> Self {
        Self { grid, position }
    }
}

/// One cell of a grid.
///
/// The rule binding is static configuration; the item is whatever the
/// container currently holds there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    inventory_type: InventoryType,
    position: usize,
    rule_id: RuleId,
    item: Option<ItemHandle>,
}

impl Slot {
    pub fn new(inventory_type: InventoryType, position: usize, rule_id: RuleId) -> Self {
        Self {
            inventory_type,
            position,
            rule_id,
            item: None,
        }
    }

    pub fn inventory_type(&self) -> InventoryType {
        self.inventory_type
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn rule_id(&self) -> RuleId {
        self.rule_id
    }

    pub fn item(&self) -> Option<ItemHandle> {
        self.item
    }

    pub fn has_item(&self) -> bool {
        self.item.is_some()
    }

    /// Mirror the container's contents into this slot; returns what was there.
    pub fn set_item(&mut self, item: Option<ItemHandle>) -> Option<ItemHandle> {
        core::mem::replace(&mut self.item, item)
    }

    pub(crate) fn assign_rule(&mut self, rule_id: RuleId) {
        self.rule_id = rule_id;
    }

    /// Exchange contents (including the empty state) with another slot.
    ///
    /// Rule bindings stay where they are.
    pub fn swap_items(&mut self, other: &mut Slot) {
        core::mem::swap(&mut self.item, &mut other.item);
    }
}
