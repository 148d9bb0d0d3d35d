//! Inventory modules: which pages are sorted together, and when.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use slotsort_core::SortResult;

use crate::config::{InventoryConfig, InventoryType};
use crate::grid::Grid;
use crate::sorter::{InventorySorter, SortReport};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModuleName {
    MainInventory,
    ArmoryInventory,
}

/// A group of pages with its own sort trigger.
///
/// The host mirrors container contents into [`InventoryModule::grids_mut`]
/// and calls [`InventoryModule::update`] at quiescent points.
pub trait InventoryModule {
    fn module_name(&self) -> ModuleName;

    fn grids(&self) -> &[Grid];

    fn grids_mut(&mut self) -> &mut [Grid];

    /// Run a pass over every inventory of the module.
    fn sort(&mut self, sorter: &InventorySorter<'_>) -> Vec<SortReport>;

    /// Last item count the trigger saw.
    fn last_item_count(&self) -> usize;

    fn set_last_item_count(&mut self, count: usize);

    fn item_count(&self) -> usize {
        self.grids().iter().map(Grid::item_count).sum()
    }

    /// Sort if the item count changed since the last update (and sorting on
    /// change is enabled). Returns whether a pass ran.
    fn update(&mut self, sorter: &InventorySorter<'_>) -> bool {
        let current = self.item_count();
        if current == self.last_item_count() {
            return false;
        }

        debug!(module = ?self.module_name(), previous = self.last_item_count(), current, "item count changed");
        let sorted = sorter.config().sort_on_inventory_change;
        if sorted {
            self.sort(sorter);
        }
        self.set_last_item_count(current);
        sorted
    }
}

fn load_grids(
    configs: &HashMap<InventoryType, InventoryConfig>,
    types: &[InventoryType],
) -> SortResult<Vec<Grid>> {
    types
        .iter()
        .map(|inventory_type| {
            let config = configs
                .get(inventory_type)
                .cloned()
                .unwrap_or_else(|| InventoryConfig::new(*inventory_type));
            Grid::new(config)
        })
        .collect()
}

/// The four main inventory pages, sorted together as one inventory.
#[derive(Debug, Clone)]
pub struct MainInventoryModule {
    grids: Vec<Grid>,
    last_item_count: usize,
}

impl MainInventoryModule {
    /// Build the pages from saved configuration; missing pages start unsorted.
    pub fn load(configs: &HashMap<InventoryType, InventoryConfig>) -> SortResult<Self> {
        Ok(Self {
            grids: load_grids(configs, &InventoryType::MAIN)?,
            last_item_count: 0,
        })
    }
}

impl InventoryModule for MainInventoryModule {
    fn module_name(&self) -> ModuleName {
        ModuleName::MainInventory
    }

    fn grids(&self) -> &[Grid] {
        &self.grids
    }

    fn grids_mut(&mut self) -> &mut [Grid] {
        &mut self.grids
    }

    fn sort(&mut self, sorter: &InventorySorter<'_>) -> Vec<SortReport> {
        sorter
            .sort_inventory_safe(InventoryType::Inventory1, &mut self.grids)
            .into_iter()
            .collect()
    }

    fn last_item_count(&self) -> usize {
        self.last_item_count
    }

    fn set_last_item_count(&mut self, count: usize) {
        self.last_item_count = count;
    }
}

/// Armory pages; each page is its own inventory.
#[derive(Debug, Clone)]
pub struct ArmoryInventoryModule {
    grids: Vec<Grid>,
    last_item_count: usize,
}

impl ArmoryInventoryModule {
    pub fn load(configs: &HashMap<InventoryType, InventoryConfig>) -> SortResult<Self> {
        Ok(Self {
            grids: load_grids(configs, &InventoryType::ARMORY)?,
            last_item_count: 0,
        })
    }
}

impl InventoryModule for ArmoryInventoryModule {
    fn module_name(&self) -> ModuleName {
        ModuleName::ArmoryInventory
    }

    fn grids(&self) -> &[Grid] {
        &self.grids
    }

    fn grids_mut(&mut self) -> &mut [Grid] {
        &mut self.grids
    }

    fn sort(&mut self, sorter: &InventorySorter<'_>) -> Vec<SortReport> {
        self.grids
            .iter_mut()
            .filter_map(|grid| {
                let inventory_type = grid.inventory_type();
                sorter.sort_inventory_safe(inventory_type, core::slice::from_mut(grid))
            })
            .collect()
    }

    fn last_item_count(&self) -> usize {
        self.last_item_count
    }

    fn set_last_item_count(&mut self, count: usize) {
        self.last_item_count = count;
    }
}
