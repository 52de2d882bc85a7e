//! Statement domain entities
//!
//! A statement is one generated utterance in a meeting transcript. Statements
//! are created exclusively by the orchestrator and never edited afterwards.

use crate::ids::{DirectorId, MeetingId, StatementId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Kind of statement within the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    Opening,
    /// A regular discussion turn.
    Statement,
    /// A direct reply to another statement (rebuttals).
    Response,
    Question,
    Summary,
    Closing,
    UserQuestion,
    QuestionResponse,
}

impl StatementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatementKind::Opening => "opening",
            StatementKind::Statement => "statement",
            StatementKind::Response => "response",
            StatementKind::Question => "question",
            StatementKind::Summary => "summary",
            StatementKind::Closing => "closing",
            StatementKind::UserQuestion => "user_question",
            StatementKind::QuestionResponse => "question_response",
        }
    }

    /// Regular turns are the ones the board mode's "has spoken this round"
    /// check looks at.
    pub fn is_regular(&self) -> bool {
        matches!(self, StatementKind::Statement | StatementKind::Response)
    }
}

impl std::fmt::Display for StatementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One generated utterance (Entity).
///
/// (meeting_id, round_number, sequence_in_round) is unique per meeting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Statement {
    pub id: StatementId,
    pub meeting_id: MeetingId,
    pub director_id: DirectorId,
    pub content: String,
    pub kind: StatementKind,
    pub round_number: u32,
    /// 1-based position within the round.
    pub sequence_in_round: u32,
    /// The statement this one replies to; must belong to the same meeting.
    pub response_to: Option<StatementId>,
    pub tokens_used: u64,
    pub generation_time_ms: u64,
    /// Model identifier, or the fallback marker when `ai_generated` is false.
    pub model: String,
    /// False when the content came from the deterministic fallback path.
    pub ai_generated: bool,
    pub created_at: DateTime<Utc>,
}

/// Walk a reply chain from `start`, following `response_to` links.
///
/// Returns the chain in reply order, starting at `start` itself. Traversal is
/// iterative with a visited set: cycles should not exist by invariant, but a
/// corrupted link must not hang the caller.
pub fn reply_chain(statements: &[Statement], start: StatementId) -> Vec<&Statement> {
    let mut chain = Vec::new();
    let mut visited: HashSet<StatementId> = HashSet::new();
    let mut cursor = Some(start);

    while let Some(id) = cursor {
        if !visited.insert(id) {
            break;
        }
        let Some(stmt) = statements.iter().find(|s| s.id == id) else {
            break;
        };
        chain.push(stmt);
        cursor = stmt.response_to;
    }

    chain
}
