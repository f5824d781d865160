//! Persistence boundary consumed by the progression tracker.
//!
//! The tracker needs exactly four operations from the backend; they are
//! expressed as a trait so the tracker can be driven by the HTTP client in
//! production and by an in-memory fake in tests. Transport, authentication
//! and serialization stay behind the implementing type.

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{Team, WorkshopAttendance, WorkshopInfo, WorkshopSubmission};

#[async_trait]
pub trait PersistenceBoundary: Send + Sync {
    /// Current roster and progress counter for a team.
    async fn get_team_by_id(&self, team_id: i64) -> Result<Team>;

    /// Recorded workshop occurrences for a team, oldest first.
    async fn get_workshops_by_team(&self, team_id: i64) -> Result<Vec<WorkshopInfo>>;

    /// Finalized attendance snapshot for one recorded occurrence.
    async fn get_workshop_attendance(
        &self,
        team_id: i64,
        workshop_id: i64,
    ) -> Result<WorkshopAttendance>;

    /// Record a new occurrence and advance the team's progress. The response
    /// is authoritative for the new counter value.
    async fn append_workshop_to_team(
        &self,
        team_id: i64,
        submission: &WorkshopSubmission,
    ) -> Result<WorkshopAttendance>;
}

// A shared boundary handle works anywhere an owned one does.
#[async_trait]
impl<T: PersistenceBoundary + ?Sized> PersistenceBoundary for std::sync::Arc<T> {
    async fn get_team_by_id(&self, team_id: i64) -> Result<Team> {
        (**self).get_team_by_id(team_id).await
    }

    async fn get_workshops_by_team(&self, team_id: i64) -> Result<Vec<WorkshopInfo>> {
        (**self).get_workshops_by_team(team_id).await
    }

    async fn get_workshop_attendance(
        &self,
        team_id: i64,
        workshop_id: i64,
    ) -> Result<WorkshopAttendance> {
        (**self).get_workshop_attendance(team_id, workshop_id).await
    }

    async fn append_workshop_to_team(
        &self,
        team_id: i64,
        submission: &WorkshopSubmission,
    ) -> Result<WorkshopAttendance> {
        (**self).append_workshop_to_team(team_id, submission).await
    }
}
