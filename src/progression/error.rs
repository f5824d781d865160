use thiserror::Error;

use crate::models::TOTAL_WORKSHOPS;

/// Validation failures detected locally, before any network call. None of
/// these are retried automatically and none mutate tracker state.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProgressionError {
    #[error("No team loaded")]
    NoTeamLoaded,

    #[error("Team has no children on its roster")]
    EmptyRoster,

    #[error("Attendance draft is incomplete: {missing} of {roster} children unmarked")]
    DraftIncomplete { missing: usize, roster: usize },

    #[error("Workshop {0} is locked - earlier workshops must be completed first")]
    StepLocked(u8),

    #[error("The workshop being submitted is not open")]
    StepNotOpen,

    #[error("Workshop {0} is completed and read-only")]
    ReadOnlyStep(u8),

    #[error("A submission is already in flight for this team")]
    SubmissionInFlight,

    #[error("All {TOTAL_WORKSHOPS} workshops are already completed")]
    ProgramFinished,

    #[error("Workshop number {0} is outside the curriculum (1..={TOTAL_WORKSHOPS})")]
    StepOutOfRange(u8),
}
