//! Catalog module - the immutable skill catalog.
//!
//! Skills, roles, categories, groups and inference rules as packaged by the
//! data build, parsed into concrete types and validated once at load time.

mod aggregate;
mod errors;
mod role;
mod rules;
mod skill;

pub use aggregate::Catalog;
pub use errors::CatalogValidationError;
pub use role::{Category, Role, SkillGroup};
pub use rules::{Comparison, Condition, InferenceRule, InferenceTarget, RuleClause};
pub use skill::{ExpectedLevels, Resource, ResourceKind, Skill};
