//! Composable filter criteria a rule is built from.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use slotsort_core::{SortError, SortResult};

use crate::attributes::{ItemAttributes, ItemCategory, ItemId, ItemRarity};

/// Inclusive numeric range; ignored while disabled.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeFilter {
    pub enabled: bool,
    pub min: u32,
    pub max: u32,
}

impl RangeFilter {
    pub fn between(min: u32, max: u32) -> Self {
        Self {
            enabled: true,
            min,
            max,
        }
    }

    pub fn admits(&self, value: u32) -> bool {
        !self.enabled || (self.min..=self.max).contains(&value)
    }

    fn validate(&self, label: &str) -> SortResult<()> {
        if self.enabled && self.min > self.max {
            return Err(SortError::validation(format!(
                "{label} range is inverted ({} > {})",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Boolean item flag that must equal `state` while enabled.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleFilter {
    pub enabled: bool,
    pub state: bool,
}

impl ToggleFilter {
    pub fn require(state: bool) -> Self {
        Self {
            enabled: true,
            state,
        }
    }

    pub fn admits(&self, flag: bool) -> bool {
        !self.enabled || flag == self.state
    }
}

/// Every criterion a rule can filter on.
///
/// Set-valued criteria are disabled while empty. Explicit exclusion vetoes an
/// item, explicit inclusion admits it, and otherwise every enabled criterion
/// must pass. A filter with nothing enabled admits nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleFilters {
    pub allowed_categories: BTreeSet<ItemCategory>,
    pub item_level: RangeFilter,
    pub vendor_price: RangeFilter,
    pub allowed_rarities: BTreeSet<ItemRarity>,
    /// Case-insensitive name fragments.
    pub allowed_names: Vec<String>,
    pub untradable: ToggleFilter,
    pub unique: ToggleFilter,
    pub collectable: ToggleFilter,
    pub dyeable: ToggleFilter,
    pub explicit_include: BTreeSet<ItemId>,
    pub explicit_exclude: BTreeSet<ItemId>,
}

impl RuleFilters {
    pub fn categories(categories: impl IntoIterator<Item = ItemCategory>) -> Self {
        Self {
            allowed_categories: categories.into_iter().collect(),
            ..Self::default()
        }
    }

    /// True if at least one criterion (besides the explicit lists) is enabled.
    pub fn has_active_filter(&self) -> bool {
        !self.allowed_categories.is_empty()
            || self.item_level.enabled
            || self.vendor_price.enabled
            || !self.allowed_rarities.is_empty()
            || !self.allowed_names.is_empty()
            || self.untradable.enabled
            || self.unique.enabled
            || self.collectable.enabled
            || self.dyeable.enabled
    }

    pub fn admits(&self, item: &ItemAttributes) -> bool {
        if self.explicit_exclude.contains(&item.item_id) {
            return false;
        }
        if self.explicit_include.contains(&item.item_id) {
            return true;
        }
        if !self.has_active_filter() {
            return false;
        }

        (self.allowed_categories.is_empty() || self.allowed_categories.contains(&item.category))
            && self.item_level.admits(item.level)
            && self.vendor_price.admits(item.vendor_price)
            && (self.allowed_rarities.is_empty() || self.allowed_rarities.contains(&item.rarity))
            && self.admits_name(&item.name)
            && self.untradable.admits(item.untradable)
            && self.unique.admits(item.unique)
            && self.collectable.admits(item.collectable)
            && self.dyeable.admits(item.dyeable)
    }

    fn admits_name(&self, name: &str) -> bool {
        if self.allowed_names.is_empty() {
            return true;
        }
        let name = name.to_lowercase();
        self.allowed_names
            .iter()
            .filter(|fragment| !fragment.trim().is_empty())
            .any(|fragment| name.contains(&fragment.trim().to_lowercase()))
    }

    pub fn validate(&self) -> SortResult<()> {
        self.item_level.validate("item level")?;
        self.vendor_price.validate("vendor price")?;

        if let Some(id) = self.explicit_include.intersection(&self.explicit_exclude).next() {
            return Err(SortError::validation(format!(
                "item {} is both explicitly included and excluded",
                id.0
            )));
        }
        Ok(())
    }
}
