//! Workshop and attendance models.
//!
//! A team works through a fixed, ordered curriculum of twelve workshops.
//! Each visited workshop leaves a server-held occurrence record (date,
//! cancellation info) plus one attendance mark per child on the roster.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of workshops in the curriculum. Positions are 1-based (1..=12)
/// and never change once a curriculum is published.
pub const TOTAL_WORKSHOPS: u8 = 12;

/// Attendance mark for a single child at a single workshop occurrence.
///
/// The backend transmits the mark as a plain string; an empty string means
/// the child has not been marked yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttendanceStatus {
    Present,
    Absent,
    Cancelled,
    #[default]
    Unset,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Cancelled => "cancelled",
            AttendanceStatus::Unset => "",
        }
    }

    /// Parse a status string. Unknown or empty values become `Unset` rather
    /// than failing the whole snapshot; the backend is not strict about case.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "present" => AttendanceStatus::Present,
            "absent" => AttendanceStatus::Absent,
            "cancelled" => AttendanceStatus::Cancelled,
            _ => AttendanceStatus::Unset,
        }
    }

    /// A mark counts toward completeness only once it is non-empty.
    pub fn is_set(&self) -> bool {
        !matches!(self, AttendanceStatus::Unset)
    }
}

impl Serialize for AttendanceStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AttendanceStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(AttendanceStatus::parse(&s))
    }
}

/// One child's mark for one workshop occurrence of one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub child_id: i64,
    pub attendance: AttendanceStatus,
}

impl AttendanceRecord {
    pub fn new(child_id: i64, attendance: AttendanceStatus) -> Self {
        Self {
            child_id,
            attendance,
        }
    }

    /// An unset record for a child who has not been marked yet.
    pub fn unset(child_id: i64) -> Self {
        Self::new(child_id, AttendanceStatus::Unset)
    }

    pub fn is_marked(&self) -> bool {
        self.attendance.is_set()
    }
}

/// Metadata for one recorded workshop occurrence of a team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkshopInfo {
    pub id: i64,
    /// 1-based position in the curriculum.
    pub number: u8,
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub cancelled: bool,
    #[serde(default)]
    pub cancellation_reason: Option<String>,
}

impl WorkshopInfo {
    pub fn date_display(&self) -> String {
        self.date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string())
    }
}

/// Server-held snapshot of a finalized workshop occurrence: metadata plus
/// the attendance list. Read-only once fetched; used to populate the view
/// of a completed step, never to seed the open step's defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkshopAttendance {
    pub workshop: WorkshopInfo,
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
}

/// Payload for recording a new workshop occurrence against a team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkshopSubmission {
    pub date: NaiveDate,
    /// 1-based position being completed, always the team's `current + 1`.
    pub workshop_number: u8,
    pub attendance: Vec<AttendanceRecord>,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!(AttendanceStatus::parse("present"), AttendanceStatus::Present);
        assert_eq!(AttendanceStatus::parse("Absent"), AttendanceStatus::Absent);
        assert_eq!(AttendanceStatus::parse("CANCELLED"), AttendanceStatus::Cancelled);
        assert_eq!(AttendanceStatus::parse(""), AttendanceStatus::Unset);
        assert_eq!(AttendanceStatus::parse("maybe"), AttendanceStatus::Unset);
    }

    #[test]
    fn test_status_serde_empty_string_is_unset() {
        let record: AttendanceRecord =
            serde_json::from_str(r#"{"child_id": 7, "attendance": ""}"#)
                .expect("Failed to parse attendance record");
        assert_eq!(record.attendance, AttendanceStatus::Unset);
        assert!(!record.is_marked());

        let json = serde_json::to_string(&record).expect("Failed to serialize record");
        assert_eq!(json, r#"{"child_id":7,"attendance":""}"#);
    }

    #[test]
    fn test_submission_wire_shape() {
        let submission = WorkshopSubmission {
            date: NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date"),
            workshop_number: 3,
            attendance: vec![
                AttendanceRecord::new(1, AttendanceStatus::Present),
                AttendanceRecord::new(2, AttendanceStatus::Absent),
            ],
        };

        let json = serde_json::to_value(&submission).expect("Failed to serialize submission");
        assert_eq!(json["date"], "2024-05-01");
        assert_eq!(json["workshop_number"], 3);
        assert_eq!(json["attendance"][0]["child_id"], 1);
        assert_eq!(json["attendance"][0]["attendance"], "present");
        assert_eq!(json["attendance"][1]["attendance"], "absent");
    }

    #[test]
    fn test_workshop_attendance_parse() {
        let json = r#"{
            "workshop": {"id": 41, "number": 2, "date": "2024-03-14", "cancelled": false},
            "attendance": [
                {"child_id": 1, "attendance": "present"},
                {"child_id": 2, "attendance": "cancelled"}
            ]
        }"#;

        let snapshot: WorkshopAttendance =
            serde_json::from_str(json).expect("Failed to parse workshop attendance");
        assert_eq!(snapshot.workshop.number, 2);
        assert_eq!(snapshot.workshop.date_display(), "2024-03-14");
        assert_eq!(snapshot.attendance.len(), 2);
        assert_eq!(snapshot.attendance[1].attendance, AttendanceStatus::Cancelled);
    }
}
