//! Inventory pages and the flattened view the sort engine works on.

use slotsort_core::{ItemHandle, RuleId, SortError, SortResult};

use crate::config::{InventoryConfig, InventoryType};
use crate::slot::{Slot, SlotAddress};

/// One inventory page: an ordered run of slots, each bound to a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    config: InventoryConfig,
    slots: Vec<Slot>,
}

impl Grid {
    /// Build a grid for one page of its inventory type.
    ///
    /// Fails if the configuration does not describe every slot of the page.
    pub fn new(config: InventoryConfig) -> SortResult<Self> {
        let page_size = config.inventory_type.page_size();
        Self::with_page_size(config, page_size)
    }

    /// Build a grid of exactly `page_size` slots; small pages for tests.
    pub(crate) fn with_page_size(config: InventoryConfig, page_size: usize) -> SortResult<Self> {
        if config.slot_configs.len() != page_size {
            return Err(SortError::slot_count_mismatch(
                config.inventory_type,
                page_size,
                config.slot_configs.len(),
            ));
        }

        let slots = config
            .slot_configs
            .iter()
            .enumerate()
            .map(|(position, slot)| Slot::new(config.inventory_type, position, slot.rule_id))
            .collect();

        Ok(Self { config, slots })
    }

    pub fn inventory_type(&self) -> InventoryType {
        self.config.inventory_type
    }

    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, position: usize) -> Option<&Slot> {
        self.slots.get(position)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn item_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.has_item()).count()
    }

    /// Current contents in position order.
    pub fn contents(&self) -> Vec<Option<ItemHandle>> {
        self.slots.iter().map(Slot::item).collect()
    }

    /// Mirror one slot of the container; returns the previous contents.
    pub fn set_item(&mut self, position: usize, item: Option<ItemHandle>) -> SortResult<Option<ItemHandle>> {
        let inventory_type = self.inventory_type();
        let slot = self
            .slots
            .get_mut(position)
            .ok_or_else(|| SortError::slot_out_of_range(inventory_type, position))?;
        Ok(slot.set_item(item))
    }

    /// Mirror the whole page at once.
    pub fn load_items(&mut self, contents: &[Option<ItemHandle>]) -> SortResult<()> {
        if contents.len() != self.slots.len() {
            return Err(SortError::slot_count_mismatch(
                self.inventory_type(),
                self.slots.len(),
                contents.len(),
            ));
        }
        for (slot, item) in self.slots.iter_mut().zip(contents) {
            slot.set_item(*item);
        }
        Ok(())
    }

    /// Rebind a slot to another rule (between passes).
    pub fn assign_rule(&mut self, position: usize, rule_id: RuleId) -> SortResult<()> {
        let inventory_type = self.inventory_type();
        let (slot, slot_config) = self
            .slots
            .get_mut(position)
            .zip(self.config.slot_configs.get_mut(position))
            .ok_or_else(|| SortError::slot_out_of_range(inventory_type, position))?;
        slot.assign_rule(rule_id);
        slot_config.rule_id = rule_id;
        Ok(())
    }
}

/// Flattened, indexable view over every slot of the grids sorted together.
///
/// Grids keep ownership of their slots; the view only addresses them.
#[derive(Debug)]
pub struct GridSet<'g> {
    grids: &'g mut [Grid],
}

impl<'g> GridSet<'g> {
    pub fn new(grids: &'g mut [Grid]) -> Self {
        Self { grids }
    }

    pub fn slot(&self, address: SlotAddress) -> Option<&Slot> {
        self.grids.get(address.grid)?.slots.get(address.position)
    }

    /// Every slot in grid order, then position order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotAddress, &Slot)> + '_ {
        self.grids.iter().enumerate().flat_map(|(grid, g)| {
            g.slots
                .iter()
                .enumerate()
                .map(move |(position, slot)| (SlotAddress::new(grid, position), slot))
        })
    }

    pub fn item_count(&self) -> usize {
        self.grids.iter().map(Grid::item_count).sum()
    }

    /// Exchange the contents of two slots.
    ///
    /// The only mutation the sorter performs. Both addresses are checked before
    /// anything moves, so a failed swap leaves both slots untouched.
    pub fn swap(&mut self, a: SlotAddress, b: SlotAddress) -> SortResult<()> {
        self.check(a)?;
        self.check(b)?;
        if a == b {
            return Ok(());
        }

        if a.grid == b.grid {
            let (x, y) = pair_mut(&mut self.grids[a.grid].slots, a.position, b.position);
            x.swap_items(y);
        } else {
            let (ga, gb) = pair_mut(&mut *self.grids, a.grid, b.grid);
            ga.slots[a.position].swap_items(&mut gb.slots[b.position]);
        }
        Ok(())
    }

    fn check(&self, address: SlotAddress) -> SortResult<()> {
        let grid = self
            .grids
            .get(address.grid)
            .ok_or_else(|| SortError::validation(format!("no grid at index {}", address.grid)))?;
        if address.position >= grid.len() {
            return Err(SortError::slot_out_of_range(grid.inventory_type(), address.position));
        }
        Ok(())
    }
}

/// Two distinct mutable elements of one slice.
fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(i, j);
    if i < j {
        let (left, right) = items.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = items.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}
