//! Sorting error model.

use thiserror::Error;

use crate::id::{ItemHandle, RuleId};

/// Result type used across the sorting layer.
pub type SortResult<T> = Result<T, SortError>;

/// Sorting-level error.
///
/// Keep this focused on deterministic failures (lookups, configuration,
/// addressing). Faults raised by host callbacks mid-pass are contained at the
/// pass boundary instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SortError {
    /// Item metadata could not be resolved for this handle.
    #[error("item attributes unavailable for {0}")]
    AttributesUnavailable(ItemHandle),

    /// A grid's slot configuration does not match the page size of its inventory.
    #[error("slot count mismatch for {inventory}: expected {expected}, got {actual}")]
    SlotCountMismatch {
        inventory: String,
        expected: usize,
        actual: usize,
    },

    /// A slot position outside of the grid was addressed.
    #[error("slot {position} out of range for {inventory}")]
    SlotOutOfRange { inventory: String, position: usize },

    /// The rule id is not registered.
    #[error("unknown rule: {0}")]
    UnknownRule(RuleId),

    /// The default rule cannot be removed or reordered.
    #[error("the default rule is reserved")]
    ReservedRule,

    /// A value failed validation (e.g. malformed rule configuration).
    #[error("validation failed: {0}")]
    Validation(String),
}

impl SortError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn slot_count_mismatch(inventory: impl core::fmt::Display, expected: usize, actual: usize) -> Self {
        Self::SlotCountMismatch {
            inventory: inventory.to_string(),
            expected,
            actual,
        }
    }

    pub fn slot_out_of_range(inventory: impl core::fmt::Display, position: usize) -> Self {
        Self::SlotOutOfRange {
            inventory: inventory.to_string(),
            position,
        }
    }
}
