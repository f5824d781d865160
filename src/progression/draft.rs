//! In-memory attendance draft for the open workshop step.
//!
//! The draft is the only mutable attendance state the client holds. It is
//! keyed by child id, preserves insertion order (the roster order as marks
//! arrive), and performs no validation: any status value is accepted,
//! including transiently empty ones. It never talks to the backend.

use crate::models::{AttendanceRecord, AttendanceStatus, Child};

/// Unsaved attendance marks for the currently open workshop step.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttendanceDraft {
    records: Vec<AttendanceRecord>,
}

impl AttendanceDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert one mark: replaces the child's existing record, or appends a
    /// new one if the child has no entry yet.
    pub fn set_attendance(&mut self, child_id: i64, status: AttendanceStatus) {
        match self.records.iter_mut().find(|r| r.child_id == child_id) {
            Some(record) => record.attendance = status,
            None => self.records.push(AttendanceRecord::new(child_id, status)),
        }
    }

    /// Replace the draft wholesale with a historical snapshot, for the
    /// read-only view of a completed step.
    pub fn load_from_history(&mut self, records: &[AttendanceRecord]) {
        self.records = records.to_vec();
    }

    /// Reset every record to unset, keeping the children. Used when the next
    /// step opens after a successful submission for the same roster.
    pub fn clear(&mut self) {
        for record in &mut self.records {
            record.attendance = AttendanceStatus::Unset;
        }
    }

    /// Replace the draft with one unset record per roster child, in roster
    /// order.
    pub fn seed(&mut self, roster: &[Child]) {
        self.records = roster.iter().map(|c| AttendanceRecord::unset(c.id)).collect();
    }

    /// Drop all records. Used when a step closes without submission.
    pub fn discard(&mut self) {
        self.records.clear();
    }

    pub fn records(&self) -> &[AttendanceRecord] {
        &self.records
    }

    pub fn status_of(&self, child_id: i64) -> Option<AttendanceStatus> {
        self.records
            .iter()
            .find(|r| r.child_id == child_id)
            .map(|r| r.attendance)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child(id: i64, name: &str) -> Child {
        Child {
            id,
            first_name: name.to_string(),
            last_name: "Test".to_string(),
            gender: None,
            birth_date: None,
        }
    }

    #[test]
    fn test_set_attendance_appends_then_replaces() {
        let mut draft = AttendanceDraft::new();
        draft.set_attendance(1, AttendanceStatus::Present);
        draft.set_attendance(2, AttendanceStatus::Absent);
        assert_eq!(draft.len(), 2);

        // Replacing keeps the original position
        draft.set_attendance(1, AttendanceStatus::Absent);
        assert_eq!(draft.len(), 2);
        assert_eq!(draft.records()[0].child_id, 1);
        assert_eq!(draft.status_of(1), Some(AttendanceStatus::Absent));
        assert_eq!(draft.status_of(2), Some(AttendanceStatus::Absent));
    }

    #[test]
    fn test_seed_creates_unset_records_in_roster_order() {
        let mut draft = AttendanceDraft::new();
        draft.set_attendance(99, AttendanceStatus::Present);

        draft.seed(&[child(3, "a"), child(1, "b"), child(2, "c")]);
        assert_eq!(draft.len(), 3);
        assert_eq!(
            draft.records().iter().map(|r| r.child_id).collect::<Vec<_>>(),
            vec![3, 1, 2]
        );
        assert!(draft.records().iter().all(|r| !r.is_marked()));
        assert_eq!(draft.status_of(99), None);
    }

    #[test]
    fn test_clear_keeps_children_but_unsets_marks() {
        let mut draft = AttendanceDraft::new();
        draft.set_attendance(1, AttendanceStatus::Present);
        draft.set_attendance(2, AttendanceStatus::Cancelled);

        draft.clear();
        assert_eq!(draft.len(), 2);
        assert_eq!(draft.status_of(1), Some(AttendanceStatus::Unset));
        assert_eq!(draft.status_of(2), Some(AttendanceStatus::Unset));
    }

    #[test]
    fn test_load_from_history_replaces_everything() {
        let mut draft = AttendanceDraft::new();
        draft.set_attendance(1, AttendanceStatus::Present);

        let history = vec![
            AttendanceRecord::new(5, AttendanceStatus::Absent),
            AttendanceRecord::new(6, AttendanceStatus::Present),
        ];
        draft.load_from_history(&history);
        assert_eq!(draft.records(), history.as_slice());
        assert_eq!(draft.status_of(1), None);
    }

    #[test]
    fn test_discard_empties_the_draft() {
        let mut draft = AttendanceDraft::new();
        draft.set_attendance(1, AttendanceStatus::Present);
        draft.discard();
        assert!(draft.is_empty());
    }
}
