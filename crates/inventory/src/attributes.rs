//! Item attributes seam.
//!
//! Item metadata (level, rarity, vendor price, category, stack info) lives
//! outside of the sorter. Rules read it through [`ItemAttributesProvider`];
//! they never mutate items.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use slotsort_core::{ItemHandle, SortError, SortResult};

/// Game item identifier (shared by every instance of the same item).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u32);

/// Item UI category (weapon, ingredient, crystal, ...).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemCategory(pub u32);

/// Item rarity, ordered from most common to rarest.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemRarity {
    White,
    Green,
    Blue,
    Purple,
    Pink,
}

impl ItemRarity {
    pub const ALL: [ItemRarity; 5] = [
        ItemRarity::White,
        ItemRarity::Green,
        ItemRarity::Blue,
        ItemRarity::Purple,
        ItemRarity::Pink,
    ];
}

/// Read-only snapshot of an item's metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAttributes {
    pub item_id: ItemId,
    pub name: String,
    pub level: u32,
    pub rarity: ItemRarity,
    pub vendor_price: u32,
    pub category: ItemCategory,
    #[serde(default = "one")]
    pub quantity: u32,
    #[serde(default = "one")]
    pub stack_size: u32,
    #[serde(default)]
    pub untradable: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub collectable: bool,
    #[serde(default)]
    pub dyeable: bool,
}

fn one() -> u32 {
    1
}

impl ItemAttributes {
    /// Minimal attribute set; everything else takes neutral defaults.
    pub fn new(item_id: ItemId, name: impl Into<String>, category: ItemCategory) -> Self {
        Self {
            item_id,
            name: name.into(),
            level: 1,
            rarity: ItemRarity::White,
            vendor_price: 0,
            category,
            quantity: 1,
            stack_size: 1,
            untradable: false,
            unique: false,
            collectable: false,
            dyeable: false,
        }
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn with_rarity(mut self, rarity: ItemRarity) -> Self {
        self.rarity = rarity;
        self
    }

    pub fn with_vendor_price(mut self, vendor_price: u32) -> Self {
        self.vendor_price = vendor_price;
        self
    }

    pub fn with_stack(mut self, quantity: u32, stack_size: u32) -> Self {
        self.quantity = quantity;
        self.stack_size = stack_size;
        self
    }

    pub fn untradable(mut self) -> Self {
        self.untradable = true;
        self
    }
}

/// Resolves item metadata for a handle.
///
/// Implementations must be side-effect free. A lookup failure is reported as
/// [`SortError::AttributesUnavailable`]; rules treat it as "not allowed".
pub trait ItemAttributesProvider {
    fn attributes(&self, item: ItemHandle) -> SortResult<ItemAttributes>;

    fn category(&self, item: ItemHandle) -> SortResult<ItemCategory> {
        Ok(self.attributes(item)?.category)
    }

    fn level(&self, item: ItemHandle) -> SortResult<u32> {
        Ok(self.attributes(item)?.level)
    }

    fn vendor_price(&self, item: ItemHandle) -> SortResult<u32> {
        Ok(self.attributes(item)?.vendor_price)
    }

    fn rarity(&self, item: ItemHandle) -> SortResult<ItemRarity> {
        Ok(self.attributes(item)?.rarity)
    }
}

/// In-memory attribute catalog for hosts, tools, and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryItemCatalog {
    items: HashMap<ItemHandle, ItemAttributes>,
}

impl InMemoryItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the attributes of a handle.
    pub fn insert(&mut self, item: ItemHandle, attributes: ItemAttributes) -> Option<ItemAttributes> {
        self.items.insert(item, attributes)
    }
}

impl ItemAttributesProvider for InMemoryItemCatalog {
    fn attributes(&self, item: ItemHandle) -> SortResult<ItemAttributes> {
        self.items
            .get(&item)
            .cloned()
            .ok_or(SortError::AttributesUnavailable(item))
    }
}
