//! The three-phase sort pass.
//!
//! 1. Move items into the categories their highest-priority matching rule claims.
//! 2. Evict items a category no longer allows into empty unsorted slots.
//! 3. Reorder each category's slots with the rule's comparator.
//!
//! Every mutation is a [`GridSet::swap`]; items are never created, dropped,
//! or parked in a scratch buffer, so aborting between two swaps always leaves
//! a valid inventory.

use std::collections::HashSet;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Instant;

use tracing::{debug, error, trace, warn};

use slotsort_core::{RuleId, SortResult};

use crate::attributes::ItemAttributesProvider;
use crate::config::{InventoryType, SystemConfig};
use crate::controller::SortController;
use crate::grid::{Grid, GridSet};
use crate::rule::SortingRule;
use crate::slot::{Slot, SlotAddress};

/// Swap counts of one pass, per phase.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct SortReport {
    pub moved_into_categories: usize,
    pub evicted: usize,
    pub reordered: usize,
}

impl SortReport {
    pub fn total_swaps(&self) -> usize {
        self.moved_into_categories + self.evicted + self.reordered
    }
}

/// Runs sort passes against a rule snapshot and an attribute source.
pub struct InventorySorter<'a> {
    controller: &'a SortController,
    items: &'a dyn ItemAttributesProvider,
    config: SystemConfig,
}

impl core::fmt::Debug for InventorySorter<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InventorySorter")
            .field("rules", &self.controller.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<'a> InventorySorter<'a> {
    pub fn new(
        controller: &'a SortController,
        items: &'a dyn ItemAttributesProvider,
        config: SystemConfig,
    ) -> Self {
        Self {
            controller,
            items,
            config,
        }
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// Sort a set of grids together as one inventory.
    ///
    /// Synchronous; runs all three phases to completion. Running it again
    /// without item changes in between performs no swaps.
    pub fn sort_inventory(&self, inventory_type: InventoryType, grids: &mut [Grid]) -> SortResult<SortReport> {
        let started = Instant::now();
        debug!(inventory = %inventory_type, grids = grids.len(), "sorting inventory");

        let mut set = GridSet::new(grids);
        let rules_for_inventory = self.rules_for_inventory(&set);

        let report = SortReport {
            moved_into_categories: self.move_items_into_categories(&mut set, &rules_for_inventory)?,
            evicted: self.remove_items_from_categories(&mut set)?,
            reordered: self.sort_categories(&mut set)?,
        };

        debug!(
            inventory = %inventory_type,
            moved = report.moved_into_categories,
            evicted = report.evicted,
            reordered = report.reordered,
            elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
            "sorted inventory"
        );
        Ok(report)
    }

    /// [`Self::sort_inventory`] behind the pass boundary: errors and panics
    /// are logged and swallowed, swaps already made stay in effect.
    pub fn sort_inventory_safe(&self, inventory_type: InventoryType, grids: &mut [Grid]) -> Option<SortReport> {
        execute_safe(inventory_type, || self.sort_inventory(inventory_type, grids))
    }

    /// Distinct rules bound to any slot of the set, in priority order.
    fn rules_for_inventory(&self, set: &GridSet<'_>) -> Vec<&'a SortingRule> {
        let mut seen: HashSet<RuleId> = HashSet::new();
        for (_, slot) in set.iter() {
            let id = slot.rule_id();
            if seen.insert(id) && !self.controller.contains(id) {
                warn!(rule_id = %id, inventory = %slot.inventory_type(), "slot bound to unknown rule, treating as unsorted");
            }
        }

        let mut rules: Vec<&'a SortingRule> = Vec::new();
        for id in seen {
            let rule = self.controller.rule(id);
            if !rules.iter().any(|r| r.id == rule.id) {
                rules.push(rule);
            }
        }
        rules.sort_by_key(|rule| rule.index);
        rules
    }

    fn slot_rule(&self, slot: &Slot) -> &'a SortingRule {
        self.controller.rule(slot.rule_id())
    }

    fn allowed(&self, rule: &SortingRule, slot: &Slot) -> bool {
        rule.is_item_slot_allowed(slot, self.items)
    }

    fn move_items_into_categories(
        &self,
        set: &mut GridSet<'_>,
        rules_for_inventory: &[&'a SortingRule],
    ) -> SortResult<usize> {
        let mut swaps = 0;

        for rule in self.controller.rules().iter().filter(|rule| !rule.is_default()) {
            let higher_priority_rules: Vec<&SortingRule> = rules_for_inventory
                .iter()
                .copied()
                .filter(|other| other.index < rule.index)
                .collect();

            // Items this rule claims that sit outside its slots and that no
            // higher-priority rule claims.
            let mut candidates: Vec<(SlotAddress, &Slot)> = set
                .iter()
                .filter(|(_, slot)| slot.has_item())
                .filter(|(_, slot)| self.slot_rule(slot).id != rule.id)
                .filter(|(_, slot)| self.allowed(rule, slot))
                .filter(|(_, slot)| !higher_priority_rules.iter().any(|other| self.allowed(other, slot)))
                .collect();
            candidates.sort_by(|(_, a), (_, b)| rule.order(a, b, self.items));
            let item_slots: Vec<SlotAddress> = candidates.into_iter().map(|(address, _)| address).collect();

            // This rule's slots whose contents do not belong there.
            let target_slots: Vec<SlotAddress> = set
                .iter()
                .filter(|(_, slot)| self.slot_rule(slot).id == rule.id)
                .filter(|(_, slot)| !self.allowed(rule, slot))
                .map(|(address, _)| address)
                .collect();

            swaps += swap_items(set, &target_slots, &item_slots)?;
        }

        Ok(swaps)
    }

    fn remove_items_from_categories(&self, set: &mut GridSet<'_>) -> SortResult<usize> {
        let mut swaps = 0;

        for rule in self.controller.rules().iter().filter(|rule| !rule.is_default()) {
            let mismatched: Vec<SlotAddress> = set
                .iter()
                .filter(|(_, slot)| self.slot_rule(slot).id == rule.id && slot.has_item())
                .filter(|(_, slot)| !self.allowed(rule, slot))
                .map(|(address, _)| address)
                .collect();

            let empty_unsorted: Vec<SlotAddress> = set
                .iter()
                .filter(|(_, slot)| self.slot_rule(slot).is_default() && !slot.has_item())
                .map(|(address, _)| address)
                .collect();

            swaps += swap_items(set, &empty_unsorted, &mismatched)?;
        }

        Ok(swaps)
    }

    fn sort_categories(&self, set: &mut GridSet<'_>) -> SortResult<usize> {
        let mut swaps = 0;

        for rule in self.controller.rules() {
            if rule.is_default() && !self.config.reorder_unsorted_items {
                continue;
            }

            let target_slots: Vec<SlotAddress> = set
                .iter()
                .filter(|(_, slot)| self.slot_rule(slot).id == rule.id)
                .map(|(address, _)| address)
                .collect();

            // Bubble sort; a pass without swaps is already the fixed point.
            for _ in 0..target_slots.len() {
                let mut swapped = false;
                for pair in target_slots.windows(2) {
                    // Both addresses came from `set.iter()`.
                    let out_of_order = match (set.slot(pair[0]), set.slot(pair[1])) {
                        (Some(a), Some(b)) => rule.compare_slots(a, b, self.items),
                        _ => false,
                    };
                    if out_of_order {
                        set.swap(pair[0], pair[1])?;
                        swapped = true;
                        swaps += 1;
                    }
                }
                if !swapped {
                    break;
                }
            }
        }

        Ok(swaps)
    }
}

/// Swap `sources[i]` into `targets[i]` for every index both lists share.
fn swap_items(set: &mut GridSet<'_>, targets: &[SlotAddress], sources: &[SlotAddress]) -> SortResult<usize> {
    for (target, source) in targets.iter().zip(sources) {
        trace!(?target, ?source, "swap");
        set.swap(*target, *source)?;
    }
    Ok(targets.len().min(sources.len()))
}

/// Run a pass at the host boundary.
///
/// Errors and panics are logged with the inventory tag and discarded.
pub fn execute_safe<T>(inventory_type: InventoryType, pass: impl FnOnce() -> SortResult<T>) -> Option<T> {
    match catch_unwind(AssertUnwindSafe(pass)) {
        Ok(Ok(value)) => Some(value),
        Ok(Err(err)) => {
            error!(inventory = %inventory_type, error = %err, "exception caught during sorting");
            None
        }
        Err(panic) => {
            let message = panic
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            error!(inventory = %inventory_type, error = %message, "exception caught during sorting");
            None
        }
    }
}
