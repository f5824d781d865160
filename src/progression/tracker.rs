//! Progression tracker: the single owner of a team's in-flight workshop
//! state.
//!
//! The tracker holds the loaded team snapshot, the attendance draft for the
//! open step, and a lazy cache of historical attendance for completed steps.
//! It is the only component that talks to the persistence boundary, and the
//! only entry point that turns a draft into a recorded, progress-advancing
//! occurrence. All methods take `&mut self`: one editor instance owns one
//! team, so mutations never interleave.

use std::collections::HashMap;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::api::PersistenceBoundary;
use crate::models::{
    AttendanceStatus, Child, Team, WorkshopAttendance, WorkshopInfo, WorkshopSubmission,
    TOTAL_WORKSHOPS,
};

use super::draft::AttendanceDraft;
use super::error::ProgressionError;
use super::reconcile;
use super::state::{step_state, step_states, StepState};

pub struct ProgressTracker<B> {
    boundary: B,

    // Loaded team snapshot
    team: Option<Team>,
    workshops: Vec<WorkshopInfo>,

    // Editor state for the open step
    draft: AttendanceDraft,
    open_step: Option<u8>,

    /// Historical attendance per completed step, fetched lazily on first
    /// open and kept for the lifetime of the loaded team.
    history: HashMap<u8, WorkshopAttendance>,

    // Flags surfaced to the UI
    busy: bool,
    saved: bool,
    last_error: Option<String>,
}

impl<B: PersistenceBoundary> ProgressTracker<B> {
    pub fn new(boundary: B) -> Self {
        Self {
            boundary,
            team: None,
            workshops: Vec::new(),
            draft: AttendanceDraft::new(),
            open_step: None,
            history: HashMap::new(),
            busy: false,
            saved: false,
            last_error: None,
        }
    }

    /// Fetch the team (roster + progress counter) and its recorded workshop
    /// occurrences, discarding any previously loaded state.
    pub async fn load(&mut self, team_id: i64) -> Result<()> {
        let team = self
            .boundary
            .get_team_by_id(team_id)
            .await
            .context("Failed to load team")?;
        let workshops = self
            .boundary
            .get_workshops_by_team(team_id)
            .await
            .context("Failed to load workshop history list")?;

        debug!(
            team_id,
            current = team.current(),
            roster = team.roster().len(),
            recorded = workshops.len(),
            "Team loaded"
        );

        self.team = Some(team);
        self.workshops = workshops;
        self.draft.discard();
        self.open_step = None;
        self.history.clear();
        self.busy = false;
        self.saved = false;
        self.last_error = None;
        Ok(())
    }

    // ===== Derived progression state =====

    /// Completed-workshop counter for the loaded team, 0 if none is loaded.
    pub fn current(&self) -> u8 {
        self.team.as_ref().map(Team::current).unwrap_or(0)
    }

    /// State of the 1-based step `n`.
    pub fn state_of(&self, n: u8) -> StepState {
        step_state(self.current(), n)
    }

    /// States for all twelve steps, recomputed from the counter.
    pub fn step_states(&self) -> [StepState; TOTAL_WORKSHOPS as usize] {
        step_states(self.current())
    }

    // ===== Step open/close =====

    /// Open a step for viewing or editing.
    ///
    /// Completed steps fetch their historical attendance on first open (one
    /// fetch per step per loaded team) and show it read-only. The current
    /// step gets a fresh all-unset draft for the roster. Locked steps reject
    /// the open attempt.
    pub async fn open_step(&mut self, n: u8) -> Result<()> {
        if n == 0 || n > TOTAL_WORKSHOPS {
            return Err(self.fail(ProgressionError::StepOutOfRange(n)));
        }
        if self.team.is_none() {
            return Err(self.fail(ProgressionError::NoTeamLoaded));
        }
        self.saved = false;

        match self.state_of(n) {
            StepState::Locked => Err(self.fail(ProgressionError::StepLocked(n))),
            StepState::Completed => {
                self.ensure_history(n).await?;
                // Lookup cannot fail after ensure_history succeeded
                if let Some(snapshot) = self.history.get(&n) {
                    reconcile::apply_history(&mut self.draft, snapshot);
                }
                self.open_step = Some(n);
                Ok(())
            }
            StepState::Current => {
                let roster = self.team.as_ref().map(|t| t.roster().to_vec()).unwrap_or_default();
                self.draft.seed(&roster);
                self.open_step = Some(n);
                Ok(())
            }
        }
    }

    /// Close the open step without submitting, discarding the draft. The
    /// progress counter is untouched.
    pub fn close_step(&mut self) {
        self.draft.discard();
        self.open_step = None;
    }

    async fn ensure_history(&mut self, n: u8) -> Result<()> {
        if self.history.contains_key(&n) {
            return Ok(());
        }

        let team_id = self.team.as_ref().map(|t| t.id).unwrap_or_default();
        let workshop_id = self
            .workshops
            .iter()
            .find(|w| w.number == n)
            .map(|w| w.id)
            .with_context(|| format!("No recorded occurrence for workshop {}", n))?;

        debug!(team_id, workshop = n, workshop_id, "Fetching historical attendance");
        let snapshot = self
            .boundary
            .get_workshop_attendance(team_id, workshop_id)
            .await
            .with_context(|| format!("Failed to fetch attendance for workshop {}", n))?;

        self.history.insert(n, snapshot);
        Ok(())
    }

    // ===== Draft editing =====

    /// Record one child's mark in the draft of the open, editable step.
    pub fn set_attendance(&mut self, child_id: i64, status: AttendanceStatus) -> Result<()> {
        let n = match self.open_step {
            Some(n) => n,
            None => return Err(self.fail(ProgressionError::StepNotOpen)),
        };
        if self.state_of(n) == StepState::Completed {
            return Err(self.fail(ProgressionError::ReadOnlyStep(n)));
        }
        self.draft.set_attendance(child_id, status);
        Ok(())
    }

    /// Whether the open draft satisfies the submission precondition: one
    /// non-empty mark per roster child.
    pub fn is_complete(&self) -> bool {
        reconcile::is_complete(&self.draft, self.roster())
    }

    // ===== Submission =====

    /// Submit the open draft as the occurrence of workshop `current + 1`.
    ///
    /// Validation failures are detected before any network call and leave
    /// everything untouched. On success the counter is taken from the
    /// server's recorded occurrence (the authoritative value, not a local
    /// increment), the submitted step becomes completed, and the next step
    /// auto-opens with an all-unset draft. On failure the draft, counter and
    /// step states are left exactly as they were; the call may be retried
    /// with an identical payload.
    pub async fn submit(&mut self, date: NaiveDate) -> Result<()> {
        if self.busy {
            return Err(self.fail(ProgressionError::SubmissionInFlight));
        }
        let (team_id, current, roster_len) = match self.team.as_ref() {
            Some(team) => (team.id, team.current(), team.roster().len()),
            None => return Err(self.fail(ProgressionError::NoTeamLoaded)),
        };
        if roster_len == 0 {
            return Err(self.fail(ProgressionError::EmptyRoster));
        }
        if current >= TOTAL_WORKSHOPS {
            return Err(self.fail(ProgressionError::ProgramFinished));
        }
        let number = current + 1;
        if self.open_step != Some(number) {
            return Err(self.fail(ProgressionError::StepNotOpen));
        }
        let missing = reconcile::missing_children(&self.draft, self.roster());
        if !missing.is_empty() {
            return Err(self.fail(ProgressionError::DraftIncomplete {
                missing: missing.len(),
                roster: roster_len,
            }));
        }

        let submission = WorkshopSubmission {
            date,
            workshop_number: number,
            attendance: self.draft.records().to_vec(),
        };

        debug!(team_id, workshop = number, %date, "Submitting workshop attendance");
        self.busy = true;
        self.saved = false;
        let result = self.boundary.append_workshop_to_team(team_id, &submission).await;
        self.busy = false;

        match result {
            Ok(recorded) => {
                self.apply_submission(recorded);
                Ok(())
            }
            Err(e) => {
                warn!(team_id, workshop = number, error = %e, "Submission failed");
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Adopt the server's view of the recorded occurrence: its workshop
    /// number is the new completed count, whatever the local expectation was.
    fn apply_submission(&mut self, recorded: WorkshopAttendance) {
        let expected = self.current() + 1;
        let new_current = recorded.workshop.number.min(TOTAL_WORKSHOPS);
        if new_current != expected {
            warn!(
                expected,
                server = new_current,
                "Server progress counter differs from local expectation, adopting server value"
            );
        }

        if let Some(team) = self.team.as_mut() {
            team.program.progress.current = new_current;
        }

        // Keep the occurrence list and the history cache in sync without a
        // refetch; the response is the snapshot for the new completed step.
        self.workshops.retain(|w| w.number != recorded.workshop.number);
        self.workshops.push(recorded.workshop.clone());
        self.workshops.sort_by_key(|w| w.number);
        self.history.insert(recorded.workshop.number, recorded);

        self.saved = true;
        self.last_error = None;

        if new_current < TOTAL_WORKSHOPS {
            // Auto-open the next step with the same roster, all marks unset
            self.draft.clear();
            self.open_step = Some(new_current + 1);
        } else {
            self.draft.discard();
            self.open_step = None;
        }
    }

    fn fail(&mut self, err: ProgressionError) -> anyhow::Error {
        self.last_error = Some(err.to_string());
        err.into()
    }

    // ===== UI surface =====

    pub fn team(&self) -> Option<&Team> {
        self.team.as_ref()
    }

    pub fn roster(&self) -> &[Child] {
        self.team.as_ref().map(|t| t.roster()).unwrap_or(&[])
    }

    pub fn workshops(&self) -> &[WorkshopInfo] {
        &self.workshops
    }

    pub fn draft(&self) -> &AttendanceDraft {
        &self.draft
    }

    /// The step currently open for viewing or editing, if any.
    pub fn opened_step(&self) -> Option<u8> {
        self.open_step
    }

    /// Cached historical snapshot for a completed step, if fetched.
    pub fn history_for(&self, n: u8) -> Option<&WorkshopAttendance> {
        self.history.get(&n)
    }

    /// True while a submission is in flight; callers must suppress further
    /// submit attempts until it clears.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// True after a successful submission, until the next open/submit.
    pub fn is_saved(&self) -> bool {
        self.saved
    }

    /// Most recent error message for inline display, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

// ============================================================================
// Tests
// ============================================================================
