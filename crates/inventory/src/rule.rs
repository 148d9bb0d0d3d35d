//! Sorting rules: a named, prioritized predicate plus comparator over slots.

use core::cmp::Ordering;

use serde::{Deserialize, Serialize};

use slotsort_core::{Entity, RuleId, SortResult};

use crate::attributes::{ItemAttributes, ItemAttributesProvider};
use crate::filter::RuleFilters;
use crate::slot::Slot;

/// Sort key used inside a rule's slots.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    #[default]
    Alphabetical,
    ItemLevel,
    Rarity,
    SellPrice,
    ItemId,
    ItemType,
    Quantity,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Where matching items gather inside a rule's slots.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillMode {
    /// Matching items first, then non-matching items, empty slots last.
    #[default]
    Top,
    /// Empty slots first, then non-matching items, matching items last.
    Bottom,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortSettings {
    pub mode: SortMode,
    pub direction: SortDirection,
    pub fill_mode: FillMode,
}

impl SortSettings {
    pub fn by(mode: SortMode, direction: SortDirection) -> Self {
        Self {
            mode,
            direction,
            fill_mode: FillMode::Top,
        }
    }
}

/// A user-authored rule.
///
/// `index` is the priority (lower wins) and is owned by the registry, which
/// re-derives it from list position. During a pass rules are read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortingRule {
    pub id: RuleId,
    pub name: String,
    #[serde(default)]
    pub index: usize,
    #[serde(default)]
    pub filters: RuleFilters,
    #[serde(default)]
    pub sort: SortSettings,
}

impl Entity for SortingRule {
    type Id = RuleId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// What a slot holds, as seen by one rule.
enum SlotKey {
    Admitted(ItemAttributes),
    Rejected(Option<ItemAttributes>),
    Empty,
}

impl SlotKey {
    fn rank(&self) -> u8 {
        match self {
            SlotKey::Admitted(_) => 0,
            SlotKey::Rejected(_) => 1,
            SlotKey::Empty => 2,
        }
    }

    fn attributes(&self) -> Option<&ItemAttributes> {
        match self {
            SlotKey::Admitted(attrs) => Some(attrs),
            SlotKey::Rejected(attrs) => attrs.as_ref(),
            SlotKey::Empty => None,
        }
    }
}

impl SortingRule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: RuleId::new(),
            name: name.into(),
            index: 0,
            filters: RuleFilters::default(),
            sort: SortSettings::default(),
        }
    }

    /// The reserved rule for slots with no specific category.
    pub fn unsorted() -> Self {
        Self {
            id: RuleId::DEFAULT,
            name: "Unsorted".to_string(),
            index: 0,
            filters: RuleFilters::default(),
            sort: SortSettings::default(),
        }
    }

    pub fn with_id(mut self, id: RuleId) -> Self {
        self.id = id;
        self
    }

    pub fn with_filters(mut self, filters: RuleFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_sort(mut self, sort: SortSettings) -> Self {
        self.sort = sort;
        self
    }

    pub fn is_default(&self) -> bool {
        self.id.is_default()
    }

    pub fn validate(&self) -> SortResult<()> {
        self.filters.validate()
    }

    /// Does this rule accept the item's attributes?
    ///
    /// The default rule accepts every item.
    pub fn admits(&self, item: &ItemAttributes) -> bool {
        self.is_default() || self.filters.admits(item)
    }

    /// True iff the slot holds an item this rule accepts.
    ///
    /// Empty slots are never allowed. A failed attribute lookup counts as
    /// "not allowed".
    pub fn is_item_slot_allowed(&self, slot: &Slot, items: &dyn ItemAttributesProvider) -> bool {
        let Some(item) = slot.item() else {
            return false;
        };
        items
            .attributes(item)
            .map(|attrs| self.admits(&attrs))
            .unwrap_or(false)
    }

    /// True if `a` must come after `b` (the pair is out of order).
    ///
    /// Equal keys never swap.
    pub fn compare_slots(&self, a: &Slot, b: &Slot, items: &dyn ItemAttributesProvider) -> bool {
        self.order(a, b, items) == Ordering::Greater
    }

    /// Total order of slot contents under this rule.
    ///
    /// Fill bucket first (matching / non-matching / empty, mirrored for
    /// [`FillMode::Bottom`]), then the configured sort key, then item id, then
    /// larger stacks first.
    pub fn order(&self, a: &Slot, b: &Slot, items: &dyn ItemAttributesProvider) -> Ordering {
        let a = self.slot_key(a, items);
        let b = self.slot_key(b, items);

        self.bucket(&a)
            .cmp(&self.bucket(&b))
            .then_with(|| match (a.attributes(), b.attributes()) {
                (Some(a), Some(b)) => self.compare_attributes(a, b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
    }

    pub fn compare_attributes(&self, a: &ItemAttributes, b: &ItemAttributes) -> Ordering {
        let primary = match self.sort.mode {
            SortMode::Alphabetical => a
                .name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name)),
            SortMode::ItemLevel => a.level.cmp(&b.level),
            SortMode::Rarity => a.rarity.cmp(&b.rarity),
            SortMode::SellPrice => a.vendor_price.cmp(&b.vendor_price),
            SortMode::ItemId => a.item_id.cmp(&b.item_id),
            SortMode::ItemType => a.category.cmp(&b.category),
            SortMode::Quantity => a.quantity.cmp(&b.quantity),
        };
        let primary = match self.sort.direction {
            SortDirection::Ascending => primary,
            SortDirection::Descending => primary.reverse(),
        };

        primary
            .then_with(|| a.item_id.cmp(&b.item_id))
            .then_with(|| b.quantity.cmp(&a.quantity))
    }

    fn slot_key(&self, slot: &Slot, items: &dyn ItemAttributesProvider) -> SlotKey {
        let Some(item) = slot.item() else {
            return SlotKey::Empty;
        };
        match items.attributes(item) {
            Ok(attrs) if self.admits(&attrs) => SlotKey::Admitted(attrs),
            Ok(attrs) => SlotKey::Rejected(Some(attrs)),
            Err(_) => SlotKey::Rejected(None),
        }
    }

    fn bucket(&self, key: &SlotKey) -> u8 {
        match self.sort.fill_mode {
            FillMode::Top => key.rank(),
            FillMode::Bottom => 2 - key.rank(),
        }
    }
}
