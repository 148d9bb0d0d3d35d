//! `slotsort-core` — foundation building blocks for slot sorting.
//!
//! This crate contains **pure** primitives (no container access, no logging).

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{SortError, SortResult};
pub use id::{ItemHandle, RuleId};
