//! Participant domain entities
//!
//! A participant is the join record between a meeting and a director. The
//! `join_order` assigned at add time is immutable and determines speaking
//! order for the rotation-based discussion modes.

use crate::ids::{DirectorId, MeetingId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status of a participant within a meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantStatus {
    Invited,
    Joined,
    Speaking,
    Finished,
    Left,
}

impl ParticipantStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantStatus::Invited => "invited",
            ParticipantStatus::Joined => "joined",
            ParticipantStatus::Speaking => "speaking",
            ParticipantStatus::Finished => "finished",
            ParticipantStatus::Left => "left",
        }
    }
}

impl std::fmt::Display for ParticipantStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Meeting membership record (Entity).
///
/// (meeting_id, director_id) is unique per meeting. Once a meeting has
/// started, participants are only ever soft-removed via [`Participant::leave`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub meeting_id: MeetingId,
    pub director_id: DirectorId,
    /// Position in speaking order, 1-based, strictly increasing per meeting.
    pub join_order: u32,
    pub is_active: bool,
    pub status: ParticipantStatus,
    pub statements_count: u64,
    pub total_tokens_used: u64,
    pub joined_at: DateTime<Utc>,
    pub left_at: Option<DateTime<Utc>>,
    pub last_statement_at: Option<DateTime<Utc>>,
}

impl Participant {
    pub fn new(meeting_id: MeetingId, director_id: DirectorId, join_order: u32) -> Self {
        Self {
            meeting_id,
            director_id,
            join_order,
            is_active: true,
            status: ParticipantStatus::Joined,
            statements_count: 0,
            total_tokens_used: 0,
            joined_at: Utc::now(),
            left_at: None,
            last_statement_at: None,
        }
    }

    /// Record that this participant produced a statement.
    pub fn record_statement(&mut self, tokens: u64, now: DateTime<Utc>) {
        self.statements_count += 1;
        self.total_tokens_used += tokens;
        self.last_statement_at = Some(now);
        self.status = ParticipantStatus::Speaking;
    }

    /// Soft removal. The record stays for transcript integrity.
    pub fn leave(&mut self, now: DateTime<Utc>) {
        self.is_active = false;
        self.status = ParticipantStatus::Left;
        self.left_at = Some(now);
    }

    pub fn has_left(&self) -> bool {
        self.status == ParticipantStatus::Left
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_participant_is_active() {
        let p = Participant::new(MeetingId(1), DirectorId(2), 1);
        assert!(p.is_active);
        assert_eq!(p.status, ParticipantStatus::Joined);
        assert!(!p.has_left());
    }

    #[test]
    fn test_leave_is_soft() {
        let mut p = Participant::new(MeetingId(1), DirectorId(2), 1);
        p.leave(Utc::now());
        assert!(p.has_left());
        assert!(!p.is_active);
        assert!(p.left_at.is_some());
    }

    #[test]
    fn test_record_statement_accumulates_tokens() {
        let mut p = Participant::new(MeetingId(1), DirectorId(2), 1);
        let now = Utc::now();
        p.record_statement(120, now);
        p.record_statement(80, now);
        assert_eq!(p.statements_count, 2);
        assert_eq!(p.total_tokens_used, 200);
        assert_eq!(p.status, ParticipantStatus::Speaking);
    }
}
