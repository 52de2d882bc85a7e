//! In-memory store adapters
//!
//! Hash-map-backed implementations of the store ports. They satisfy the
//! engine's full contract (id allocation, ordering, uniqueness constraints)
//! and back the tests and the demo binary; a relational adapter can replace
//! them without touching the orchestrator.

use async_trait::async_trait;
use boardroom_application::ports::{DirectorStore, MeetingStore, StoreError};
use boardroom_domain::{
    Director, DirectorId, Meeting, MeetingId, Participant, Statement, StatementId,
};
use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicI64, Ordering};

/// In-memory director store.
pub struct InMemoryDirectorStore {
    directors: RwLock<HashMap<DirectorId, Director>>,
    next_id: AtomicI64,
}

impl InMemoryDirectorStore {
    pub fn new() -> Self {
        Self {
            directors: RwLock::new(HashMap::new()),
            // Ids start at 1; 0 is the unsaved placeholder.
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryDirectorStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DirectorStore for InMemoryDirectorStore {
    async fn insert(&self, mut director: Director) -> Result<Director, StoreError> {
        let mut directors = self.directors.write().expect("director store poisoned");
        let clash = directors.values().any(|d| {
            d.name == director.name && d.status != boardroom_domain::DirectorStatus::Archived
        });
        if clash {
            return Err(StoreError::Constraint(format!(
                "director name already in use: {}",
                director.name
            )));
        }
        director.id = DirectorId(self.next_id.fetch_add(1, Ordering::SeqCst));
        directors.insert(director.id, director.clone());
        Ok(director)
    }

    async fn get(&self, id: DirectorId) -> Result<Option<Director>, StoreError> {
        Ok(self
            .directors
            .read()
            .expect("director store poisoned")
            .get(&id)
            .cloned())
    }

    async fn get_many(&self, ids: &[DirectorId]) -> Result<Vec<Director>, StoreError> {
        let directors = self.directors.read().expect("director store poisoned");
        Ok(ids.iter().filter_map(|id| directors.get(id).cloned()).collect())
    }

    async fn list(&self) -> Result<Vec<Director>, StoreError> {
        let directors = self.directors.read().expect("director store poisoned");
        let mut all: Vec<Director> = directors.values().cloned().collect();
        all.sort_by_key(|d| d.id);
        Ok(all)
    }

    async fn update(&self, director: &Director) -> Result<(), StoreError> {
        let mut directors = self.directors.write().expect("director store poisoned");
        match directors.get_mut(&director.id) {
            Some(slot) => {
                *slot = director.clone();
                Ok(())
            }
            None => Err(StoreError::Constraint(format!(
                "director {} does not exist",
                director.id
            ))),
        }
    }
}

/// In-memory meeting store covering meetings, participants and statements.
pub struct InMemoryMeetingStore {
    meetings: RwLock<HashMap<MeetingId, Meeting>>,
    participants: RwLock<Vec<Participant>>,
    statements: RwLock<Vec<Statement>>,
    next_meeting_id: AtomicI64,
    next_statement_id: AtomicI64,
}

impl InMemoryMeetingStore {
    pub fn new() -> Self {
        Self {
            meetings: RwLock::new(HashMap::new()),
            participants: RwLock::new(Vec::new()),
            statements: RwLock::new(Vec::new()),
            next_meeting_id: AtomicI64::new(1),
            next_statement_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryMeetingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MeetingStore for InMemoryMeetingStore {
    async fn insert_meeting(&self, mut meeting: Meeting) -> Result<Meeting, StoreError> {
        meeting.id = MeetingId(self.next_meeting_id.fetch_add(1, Ordering::SeqCst));
        self.meetings
            .write()
            .expect("meeting store poisoned")
            .insert(meeting.id, meeting.clone());
        Ok(meeting)
    }

    async fn meeting(&self, id: MeetingId) -> Result<Option<Meeting>, StoreError> {
        Ok(self
            .meetings
            .read()
            .expect("meeting store poisoned")
            .get(&id)
            .cloned())
    }

    async fn list_meetings(&self) -> Result<Vec<Meeting>, StoreError> {
        let meetings = self.meetings.read().expect("meeting store poisoned");
        let mut all: Vec<Meeting> = meetings.values().cloned().collect();
        all.sort_by_key(|m| m.id);
        Ok(all)
    }

    async fn update_meeting(&self, meeting: &Meeting) -> Result<(), StoreError> {
        let mut meetings = self.meetings.write().expect("meeting store poisoned");
        match meetings.get_mut(&meeting.id) {
            Some(slot) => {
                *slot = meeting.clone();
                Ok(())
            }
            None => Err(StoreError::Constraint(format!(
                "meeting {} does not exist",
                meeting.id
            ))),
        }
    }

    async fn insert_participant(&self, participant: Participant) -> Result<(), StoreError> {
        let mut participants = self.participants.write().expect("meeting store poisoned");
        let exists = participants.iter().any(|p| {
            p.meeting_id == participant.meeting_id && p.director_id == participant.director_id
        });
        if exists {
            return Err(StoreError::Constraint(format!(
                "director {} already joined meeting {}",
                participant.director_id, participant.meeting_id
            )));
        }
        participants.push(participant);
        Ok(())
    }

    async fn participants(&self, meeting: MeetingId) -> Result<Vec<Participant>, StoreError> {
        let participants = self.participants.read().expect("meeting store poisoned");
        let mut of_meeting: Vec<Participant> = participants
            .iter()
            .filter(|p| p.meeting_id == meeting)
            .cloned()
            .collect();
        of_meeting.sort_by_key(|p| p.join_order);
        Ok(of_meeting)
    }

    async fn update_participant(&self, participant: &Participant) -> Result<(), StoreError> {
        let mut participants = self.participants.write().expect("meeting store poisoned");
        match participants.iter_mut().find(|p| {
            p.meeting_id == participant.meeting_id && p.director_id == participant.director_id
        }) {
            Some(slot) => {
                *slot = participant.clone();
                Ok(())
            }
            None => Err(StoreError::Constraint(format!(
                "director {} is not in meeting {}",
                participant.director_id, participant.meeting_id
            ))),
        }
    }

    async fn delete_participant(
        &self,
        meeting: MeetingId,
        director: DirectorId,
    ) -> Result<(), StoreError> {
        let mut participants = self.participants.write().expect("meeting store poisoned");
        let before = participants.len();
        participants.retain(|p| !(p.meeting_id == meeting && p.director_id == director));
        if participants.len() == before {
            return Err(StoreError::Constraint(format!(
                "director {director} is not in meeting {meeting}"
            )));
        }
        Ok(())
    }

    async fn insert_statement(&self, mut statement: Statement) -> Result<Statement, StoreError> {
        let mut statements = self.statements.write().expect("meeting store poisoned");
        statement.id = StatementId(self.next_statement_id.fetch_add(1, Ordering::SeqCst));
        statements.push(statement.clone());
        Ok(statement)
    }

    async fn statements(
        &self,
        meeting: MeetingId,
        round: Option<u32>,
    ) -> Result<Vec<Statement>, StoreError> {
        let statements = self.statements.read().expect("meeting store poisoned");
        Ok(statements
            .iter()
            .filter(|s| s.meeting_id == meeting)
            .filter(|s| round.is_none_or(|r| s.round_number == r))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let store = InMemoryDirectorStore::new();
        let a = store.insert(Director::new("A", "T", "P")).await.unwrap();
        let b = store.insert(Director::new("B", "T", "P")).await.unwrap();
        assert!(b.id > a.id);
    }

    #[tokio::test]
    async fn test_director_name_unique_among_non_archived() {
        let store = InMemoryDirectorStore::new();
        let mut a = store.insert(Director::new("Ada", "T", "P")).await.unwrap();
        assert!(store.insert(Director::new("Ada", "T", "P")).await.is_err());

        a.archive();
        store.update(&a).await.unwrap();
        assert!(store.insert(Director::new("Ada", "T", "P")).await.is_ok());
    }

    #[tokio::test]
    async fn test_participant_pair_unique() {
        let store = InMemoryMeetingStore::new();
        let p = Participant::new(MeetingId(1), DirectorId(1), 1);
        store.insert_participant(p.clone()).await.unwrap();
        assert!(store.insert_participant(p).await.is_err());
    }

    #[tokio::test]
    async fn test_statements_round_filter() {
        let store = InMemoryMeetingStore::new();
        for (round, seq) in [(0u32, 1u32), (0, 2), (1, 1)] {
            let s = Statement {
                id: StatementId(0),
                meeting_id: MeetingId(1),
                director_id: DirectorId(1),
                content: "x".into(),
                kind: boardroom_domain::StatementKind::Statement,
                round_number: round,
                sequence_in_round: seq,
                response_to: None,
                tokens_used: 0,
                generation_time_ms: 0,
                model: "test".into(),
                ai_generated: false,
                created_at: chrono::Utc::now(),
            };
            store.insert_statement(s).await.unwrap();
        }
        assert_eq!(store.statements(MeetingId(1), None).await.unwrap().len(), 3);
        assert_eq!(
            store.statements(MeetingId(1), Some(0)).await.unwrap().len(),
            2
        );
        assert_eq!(
            store.statements(MeetingId(1), Some(1)).await.unwrap().len(),
            1
        );
    }
}
