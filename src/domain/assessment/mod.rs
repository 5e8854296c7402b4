//! Assessment module - the session engine's domain core.
//!
//! - `builder` - selects and orders the skills of a session
//! - `inference` - pure rule evaluation over current answers
//! - `state` - session state and its transitions
//! - `progress` - derived completion views

mod answer;
mod builder;
mod inference;
mod mode;
mod progress;
mod state;

pub use answer::{Answer, AnswerOrigin};
pub use builder::{build_session_plan, SessionPlan, SessionSkill};
pub use inference::{evaluate_inferences, InferredSuggestion};
pub use mode::{AssessmentMode, AssessmentSetup};
pub use progress::{AssessmentProgress, CurrentGroup, GroupProgress};
pub use state::{AssessmentState, AssessmentStatus};
