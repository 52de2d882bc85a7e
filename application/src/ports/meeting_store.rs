//! Meeting store port

use super::StoreError;
use async_trait::async_trait;
use boardroom_domain::{DirectorId, Meeting, MeetingId, Participant, Statement};

/// Persistence port for meetings, participants and statements.
#[async_trait]
pub trait MeetingStore: Send + Sync {
    /// Insert a new meeting; the store assigns the id.
    async fn insert_meeting(&self, meeting: Meeting) -> Result<Meeting, StoreError>;

    async fn meeting(&self, id: MeetingId) -> Result<Option<Meeting>, StoreError>;

    async fn list_meetings(&self) -> Result<Vec<Meeting>, StoreError>;

    async fn update_meeting(&self, meeting: &Meeting) -> Result<(), StoreError>;

    /// Insert a participant. Fails with [`StoreError::Constraint`] if the
    /// (meeting, director) pair already exists.
    async fn insert_participant(&self, participant: Participant) -> Result<(), StoreError>;

    /// All participants of a meeting, ordered by join_order.
    async fn participants(&self, meeting: MeetingId) -> Result<Vec<Participant>, StoreError>;

    async fn update_participant(&self, participant: &Participant) -> Result<(), StoreError>;

    /// Hard removal. Only legal while the meeting is preparing; the
    /// orchestrator enforces that rule.
    async fn delete_participant(
        &self,
        meeting: MeetingId,
        director: DirectorId,
    ) -> Result<(), StoreError>;

    /// Insert a statement; the store assigns the id.
    async fn insert_statement(&self, statement: Statement) -> Result<Statement, StoreError>;

    /// Statements of a meeting in creation order, optionally filtered to one
    /// round.
    async fn statements(
        &self,
        meeting: MeetingId,
        round: Option<u32>,
    ) -> Result<Vec<Statement>, StoreError>;
}
