//! Strongly-typed identifiers used across the sorter.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SortError;

/// Identifier of a sorting rule.
///
/// The nil UUID is reserved for the default (unsorted) rule.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(Uuid);

impl RuleId {
    /// Well-known id of the default/unsorted rule.
    pub const DEFAULT: RuleId = RuleId(Uuid::nil());

    /// Create a new identifier.
    ///
    /// Uses UUIDv7 (time-ordered). Prefer passing IDs explicitly in tests
    /// for determinism.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn is_default(&self) -> bool {
        *self == Self::DEFAULT
    }
}

impl Default for RuleId {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl core::fmt::Display for RuleId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.is_default() {
            return f.write_str("default");
        }
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for RuleId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<RuleId> for Uuid {
    fn from(value: RuleId) -> Self {
        value.0
    }
}

impl FromStr for RuleId {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("default") {
            return Ok(Self::DEFAULT);
        }
        let uuid = Uuid::from_str(s)
            .map_err(|e| SortError::validation(format!("RuleId: {e}")))?;
        Ok(Self(uuid))
    }
}

/// Opaque handle to an item owned by the external container.
///
/// The sorter never constructs or copies items; it only moves handles between
/// slots. Two slots never hold the same handle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemHandle(u64);

impl ItemHandle {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for ItemHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "item#{}", self.0)
    }
}
