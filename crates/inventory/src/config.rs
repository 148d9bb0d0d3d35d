//! Static configuration: inventory page layout, per-slot rule bindings, and
//! system-wide toggles.

use serde::{Deserialize, Serialize};

use slotsort_core::RuleId;

/// Inventory pages the sorter knows how to lay out.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InventoryType {
    Inventory1,
    Inventory2,
    Inventory3,
    Inventory4,
    ArmoryMainHand,
    ArmoryOffHand,
    ArmoryHead,
    ArmoryBody,
    ArmoryHands,
    ArmoryLegs,
    ArmoryFeet,
    ArmoryEar,
    ArmoryNeck,
    ArmoryWrist,
    ArmoryRings,
    SaddleBag1,
    SaddleBag2,
}

impl InventoryType {
    /// Main inventory pages, sorted together as one inventory.
    pub const MAIN: [InventoryType; 4] = [
        InventoryType::Inventory1,
        InventoryType::Inventory2,
        InventoryType::Inventory3,
        InventoryType::Inventory4,
    ];

    /// Armory chest pages, each sorted on its own.
    pub const ARMORY: [InventoryType; 11] = [
        InventoryType::ArmoryMainHand,
        InventoryType::ArmoryOffHand,
        InventoryType::ArmoryHead,
        InventoryType::ArmoryBody,
        InventoryType::ArmoryHands,
        InventoryType::ArmoryLegs,
        InventoryType::ArmoryFeet,
        InventoryType::ArmoryEar,
        InventoryType::ArmoryNeck,
        InventoryType::ArmoryWrist,
        InventoryType::ArmoryRings,
    ];

    /// Number of slots on one page of this inventory.
    pub fn page_size(self) -> usize {
        match self {
            InventoryType::ArmoryMainHand => 50,
            _ => 35,
        }
    }
}

impl core::fmt::Display for InventoryType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(self, f)
    }
}

/// Static binding of one slot to a rule.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotConfig {
    pub rule_id: RuleId,
}

/// Per-page slot bindings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryConfig {
    pub inventory_type: InventoryType,
    pub slot_configs: Vec<SlotConfig>,
}

impl InventoryConfig {
    /// A full page with every slot bound to the default rule.
    pub fn new(inventory_type: InventoryType) -> Self {
        Self {
            inventory_type,
            slot_configs: vec![SlotConfig::default(); inventory_type.page_size()],
        }
    }

    /// Explicit bindings, one rule id per slot in position order.
    pub fn with_rules(inventory_type: InventoryType, rule_ids: impl IntoIterator<Item = RuleId>) -> Self {
        Self {
            inventory_type,
            slot_configs: rule_ids.into_iter().map(|rule_id| SlotConfig { rule_id }).collect(),
        }
    }
}

/// System-wide toggles.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Run a pass whenever a module notices its item count changed.
    pub sort_on_inventory_change: bool,
    /// Also reorder slots bound to the default rule.
    pub reorder_unsorted_items: bool,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            sort_on_inventory_change: true,
            reorder_unsorted_items: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_page_binds_every_slot_to_default_rule() {
        let config = InventoryConfig::new(InventoryType::Inventory2);
        assert_eq!(config.slot_configs.len(), 35);
        assert!(config.slot_configs.iter().all(|s| s.rule_id.is_default()));

        let armory = InventoryConfig::new(InventoryType::ArmoryMainHand);
        assert_eq!(armory.slot_configs.len(), 50);
    }

    #[test]
    fn system_config_fills_missing_fields_with_defaults() {
        let config: SystemConfig = serde_json::from_str(r#"{"reorder_unsorted_items":true}"#).unwrap();
        assert!(config.sort_on_inventory_change);
        assert!(config.reorder_unsorted_items);
    }
}
