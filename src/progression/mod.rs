//! Workshop progression tracking.
//!
//! The one subsystem with real state-machine semantics: which of the twelve
//! curriculum steps are completed, current or locked, the in-memory
//! attendance draft for the open step, completeness validation, and the
//! submission flow that records an occurrence and advances the counter.
//!
//! - `state`: pure step-state derivation from the progress counter
//! - `draft`: the mutable attendance draft
//! - `reconcile`: completeness checks and history reconciliation
//! - `tracker`: the coordinator tying it all to the persistence boundary

pub mod draft;
pub mod error;
pub mod reconcile;
pub mod state;
pub mod tracker;

pub use draft::AttendanceDraft;
pub use error::ProgressionError;
pub use reconcile::{is_complete, missing_children};
pub use state::{step_state, step_states, StepState};
pub use tracker::ProgressTracker;
