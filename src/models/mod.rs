//! Data models for coaching program entities.
//!
//! This module contains the data structures used to represent
//! backend data including:
//!
//! - `Team`, `Child`: roster and program progress
//! - `Community`: the organization a team belongs to
//! - Workshop types: `WorkshopInfo`, `WorkshopAttendance`, `AttendanceRecord`

pub mod community;
pub mod team;
pub mod workshop;

pub use community::Community;
pub use team::{Child, Program, Progress, Team};
pub use workshop::{
    AttendanceRecord, AttendanceStatus, WorkshopAttendance, WorkshopInfo, WorkshopSubmission,
    TOTAL_WORKSHOPS,
};
