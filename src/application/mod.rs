//! Application layer - the assessment engine.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! The engine holds the catalog and a state store behind their port
//! interfaces and never touches storage formats directly.

pub mod engine;

pub use engine::{AssessmentEngine, CurrentSkill, EngineSettings};
