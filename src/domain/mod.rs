//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `catalog` - Immutable skill catalog, groups and inference rules
//! - `assessment` - Session building, rule evaluation, state and progress

pub mod assessment;
pub mod catalog;
pub mod foundation;
