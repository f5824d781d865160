//! Draft completeness and history reconciliation.
//!
//! A draft is submittable only when every roster child carries exactly one
//! non-empty mark. Historical attendance arriving for a completed step
//! replaces the draft wholesale: completed steps are fetched-then-displayed
//! and never locally edited first, so there is nothing to merge.

use crate::models::{Child, WorkshopAttendance};

use super::draft::AttendanceDraft;

/// True iff every child in the roster has exactly one record in the draft
/// with a non-empty status. Draft records for children outside the roster
/// are ignored.
pub fn is_complete(draft: &AttendanceDraft, roster: &[Child]) -> bool {
    missing_children(draft, roster).is_empty()
}

/// Ids of roster children still blocking submission: missing from the draft,
/// unmarked, or (defensively) marked more than once.
pub fn missing_children(draft: &AttendanceDraft, roster: &[Child]) -> Vec<i64> {
    roster
        .iter()
        .filter(|child| {
            let marks = draft
                .records()
                .iter()
                .filter(|r| r.child_id == child.id)
                .count();
            marks != 1 || !draft.status_of(child.id).map(|s| s.is_set()).unwrap_or(false)
        })
        .map(|child| child.id)
        .collect()
}

/// Replace the draft with the server-held snapshot of a completed step.
pub fn apply_history(draft: &mut AttendanceDraft, history: &WorkshopAttendance) {
    draft.load_from_history(&history.attendance);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttendanceRecord, AttendanceStatus, WorkshopInfo};

    fn child(id: i64) -> Child {
        Child {
            id,
            first_name: format!("c{}", id),
            last_name: "Test".to_string(),
            gender: None,
            birth_date: None,
        }
    }

    #[test]
    fn test_complete_when_every_child_marked() {
        let roster = vec![child(1), child(2)];
        let mut draft = AttendanceDraft::new();
        draft.set_attendance(1, AttendanceStatus::Present);
        draft.set_attendance(2, AttendanceStatus::Absent);
        assert!(is_complete(&draft, &roster));
    }

    #[test]
    fn test_incomplete_when_child_missing_from_draft() {
        let roster = vec![child(1), child(2)];
        let mut draft = AttendanceDraft::new();
        draft.set_attendance(1, AttendanceStatus::Present);
        assert!(!is_complete(&draft, &roster));
        assert_eq!(missing_children(&draft, &roster), vec![2]);
    }

    #[test]
    fn test_incomplete_when_mark_is_unset() {
        let roster = vec![child(1), child(2)];
        let mut draft = AttendanceDraft::new();
        draft.seed(&roster);
        draft.set_attendance(1, AttendanceStatus::Present);
        assert!(!is_complete(&draft, &roster));
        assert_eq!(missing_children(&draft, &roster), vec![2]);
    }

    #[test]
    fn test_non_roster_records_are_ignored() {
        let roster = vec![child(1)];
        let mut draft = AttendanceDraft::new();
        draft.set_attendance(1, AttendanceStatus::Present);
        draft.set_attendance(42, AttendanceStatus::Unset);
        assert!(is_complete(&draft, &roster));
    }

    #[test]
    fn test_empty_roster_is_trivially_complete() {
        // Submission for an empty roster is rejected earlier; completeness
        // alone has nothing to check.
        assert!(is_complete(&AttendanceDraft::new(), &[]));
    }

    #[test]
    fn test_apply_history_replaces_draft() {
        let mut draft = AttendanceDraft::new();
        draft.set_attendance(1, AttendanceStatus::Present);

        let history = WorkshopAttendance {
            workshop: WorkshopInfo {
                id: 10,
                number: 1,
                date: None,
                cancelled: false,
                cancellation_reason: None,
            },
            attendance: vec![AttendanceRecord::new(2, AttendanceStatus::Absent)],
        };
        apply_history(&mut draft, &history);
        assert_eq!(draft.records(), history.attendance.as_slice());
    }
}
