//! Core library for coachtrack - API client, domain models, and workshop
//! progression tracking for community coaching programs.
//!
//! Each team advances through a fixed twelve-workshop curriculum. This crate
//! models that progression (step states, attendance drafts, completeness
//! validation, submission) and the read/write contract with the backend that
//! durably stores workshops, attendance and progress counters. It contains
//! no UI: shells consume `ProgressTracker` and render its state.

pub mod api;
pub mod config;
pub mod models;
pub mod progression;

pub use api::{ApiClient, ApiError, PersistenceBoundary};
pub use config::Config;
pub use models::{
    AttendanceRecord, AttendanceStatus, Child, Community, Program, Progress, Team,
    WorkshopAttendance, WorkshopInfo, WorkshopSubmission, TOTAL_WORKSHOPS,
};
pub use progression::{
    AttendanceDraft, ProgressTracker, ProgressionError, StepState,
};
