//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types
//! that form the vocabulary of the skills matrix domain.

mod confidence;
mod errors;
mod ids;
mod level;
mod percentage;
mod timestamp;

pub use confidence::Confidence;
pub use errors::ValidationError;
pub use ids::{CategoryId, GroupId, RoleId, SkillId};
pub use level::Level;
pub use percentage::Percentage;
pub use timestamp::Timestamp;
