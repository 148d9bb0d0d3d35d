//! Rule-driven inventory reorganizer.
//!
//! This crate contains the sorting rules and the three-phase reconciliation
//! pass, implemented purely as deterministic logic over grids of slots (no
//! container memory access, no UI, no persistence).

pub mod attributes;
pub mod config;
pub mod controller;
pub mod filter;
pub mod grid;
pub mod module;
pub mod rule;
pub mod slot;
pub mod sorter;

pub use attributes::{
    InMemoryItemCatalog, ItemAttributes, ItemAttributesProvider, ItemCategory, ItemId, ItemRarity,
};
pub use config::{InventoryConfig, InventoryType, SlotConfig, SystemConfig};
pub use controller::SortController;
pub use filter::{RangeFilter, RuleFilters, ToggleFilter};
pub use grid::{Grid, GridSet};
pub use module::{ArmoryInventoryModule, InventoryModule, MainInventoryModule, ModuleName};
pub use rule::{FillMode, SortDirection, SortMode, SortSettings, SortingRule};
pub use slot::{Slot, SlotAddress};
pub use sorter::{InventorySorter, SortReport, execute_safe};
