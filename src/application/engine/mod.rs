//! Assessment engine - the API surface presentation layers drive.
//!
//! The engine owns the single in-progress `AssessmentState`, applies
//! domain transitions to it and persists the result after every mutation.

mod assessment_engine;
mod settings;

pub use assessment_engine::{AssessmentEngine, CurrentSkill};
pub use settings::{EngineSettings, DEFAULT_OTHER_GROUP_NAME, DEFAULT_STORAGE_KEY};
