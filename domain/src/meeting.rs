//! Meeting domain entities
//!
//! A meeting is one discussion session among directors. The status enum
//! carries `Opening` and `Concluding` as data values for the API layer, but
//! the state machine folds them into the active states: only `Discussing`
//! and `Debating` accept pause/advance.

use crate::ids::MeetingId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status of a meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeetingStatus {
    Preparing,
    Opening,
    Discussing,
    Debating,
    Paused,
    Concluding,
    Finished,
}

impl MeetingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeetingStatus::Preparing => "preparing",
            MeetingStatus::Opening => "opening",
            MeetingStatus::Discussing => "discussing",
            MeetingStatus::Debating => "debating",
            MeetingStatus::Paused => "paused",
            MeetingStatus::Concluding => "concluding",
            MeetingStatus::Finished => "finished",
        }
    }

    /// Active states are the only ones from which pause and advance are legal.
    pub fn is_active(&self) -> bool {
        matches!(self, MeetingStatus::Discussing | MeetingStatus::Debating)
    }
}

impl std::fmt::Display for MeetingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How speakers are scheduled within a meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscussionMode {
    /// Strict rotation by join order; everyone speaks once per round.
    RoundRobin,
    /// Alternates between the first two participants (pro/con camps).
    Debate,
    /// Round-robin indexing where rounds represent depth layers.
    Focus,
    /// Uniform random speaker; no fairness guarantee.
    Free,
    /// Anyone who has not spoken this round goes first, in join order.
    Board,
}

impl DiscussionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscussionMode::RoundRobin => "round_robin",
            DiscussionMode::Debate => "debate",
            DiscussionMode::Focus => "focus",
            DiscussionMode::Free => "free",
            DiscussionMode::Board => "board",
        }
    }

    /// The active status a meeting in this mode runs in.
    pub fn active_status(&self) -> MeetingStatus {
        match self {
            DiscussionMode::Debate => MeetingStatus::Debating,
            _ => MeetingStatus::Discussing,
        }
    }
}

impl std::fmt::Display for DiscussionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DiscussionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "round_robin" | "round-robin" => Ok(DiscussionMode::RoundRobin),
            "debate" => Ok(DiscussionMode::Debate),
            "focus" => Ok(DiscussionMode::Focus),
            "free" => Ok(DiscussionMode::Free),
            "board" => Ok(DiscussionMode::Board),
            other => Err(format!("unknown discussion mode: {other}")),
        }
    }
}

/// One discussion session (Entity).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meeting {
    pub id: MeetingId,
    pub title: String,
    /// The discussion prompt all statements react to.
    pub topic: String,
    pub status: MeetingStatus,
    pub discussion_mode: DiscussionMode,
    pub max_rounds: u32,
    /// Starts at 0 and only increments on round rollover. Never exceeds
    /// `max_rounds`.
    pub current_round: u32,
    pub max_participants: u32,
    pub started_at: Option<DateTime<Utc>>,
    pub paused_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub total_statements: u64,
    /// Count of non-left participants.
    pub total_participants: u32,
    /// Populated by the post-hoc summarization collaborator, not the engine.
    pub summary: Option<String>,
    pub key_points: Vec<String>,
    pub controversies: Vec<String>,
}

impl Meeting {
    pub fn new(
        title: impl Into<String>,
        topic: impl Into<String>,
        mode: DiscussionMode,
        max_rounds: u32,
        max_participants: u32,
    ) -> Self {
        Self {
            id: MeetingId(0),
            title: title.into(),
            topic: topic.into(),
            status: MeetingStatus::Preparing,
            discussion_mode: mode,
            max_rounds,
            current_round: 0,
            max_participants,
            started_at: None,
            paused_at: None,
            ended_at: None,
            total_statements: 0,
            total_participants: 0,
            summary: None,
            key_points: Vec::new(),
            controversies: Vec::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// The active status this meeting runs in, derived from its mode.
    pub fn active_status(&self) -> MeetingStatus {
        self.discussion_mode.active_status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_meeting_is_preparing() {
        let m = Meeting::new("Q3 board", "AI strategy", DiscussionMode::RoundRobin, 3, 8);
        assert_eq!(m.status, MeetingStatus::Preparing);
        assert_eq!(m.current_round, 0);
        assert!(!m.is_active());
    }

    #[test]
    fn test_debate_mode_runs_in_debating() {
        let m = Meeting::new("Showdown", "Tabs vs spaces", DiscussionMode::Debate, 2, 2);
        assert_eq!(m.active_status(), MeetingStatus::Debating);
        let m = Meeting::new("Board", "Budget", DiscussionMode::Board, 2, 5);
        assert_eq!(m.active_status(), MeetingStatus::Discussing);
    }

    #[test]
    fn test_mode_round_trip() {
        for mode in [
            DiscussionMode::RoundRobin,
            DiscussionMode::Debate,
            DiscussionMode::Focus,
            DiscussionMode::Free,
            DiscussionMode::Board,
        ] {
            let parsed: DiscussionMode = mode.as_str().parse().unwrap();
            assert_eq!(parsed, mode);
        }
        assert!("pantomime".parse::<DiscussionMode>().is_err());
    }
}
