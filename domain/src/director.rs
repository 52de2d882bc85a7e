//! Director domain entities
//!
//! A director is a persona definition: a public-figure-style identity with a
//! persona prompt that drives its voice during meetings.

use crate::ids::DirectorId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a director.
///
/// Directors referenced by statements or participants are never hard-deleted;
/// removal is a transition to `Archived`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectorStatus {
    Active,
    Inactive,
    Retired,
    Suspended,
    Archived,
}

impl DirectorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DirectorStatus::Active => "active",
            DirectorStatus::Inactive => "inactive",
            DirectorStatus::Retired => "retired",
            DirectorStatus::Suspended => "suspended",
            DirectorStatus::Archived => "archived",
        }
    }
}

impl std::fmt::Display for DirectorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A persona definition (Entity).
///
/// The `persona_prompt` is the system-channel text that defines the
/// director's voice; everything else is descriptive metadata and usage
/// counters maintained by the orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Director {
    pub id: DirectorId,
    /// Human-readable name, unique among non-archived directors.
    pub name: String,
    pub title: String,
    pub era: String,
    /// System prompt defining voice and behavior. Required.
    pub persona_prompt: String,
    pub personality_traits: Vec<String>,
    pub core_beliefs: Vec<String>,
    pub expertise_areas: Vec<String>,
    pub speaking_style: String,
    pub is_active: bool,
    pub status: DirectorStatus,
    pub total_statements: u64,
    pub total_meetings: u64,
    pub last_active: Option<DateTime<Utc>>,
}

impl Director {
    /// Create a new director with the minimum required fields.
    ///
    /// The id is a placeholder until the store assigns one on insert.
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        persona_prompt: impl Into<String>,
    ) -> Self {
        Self {
            id: DirectorId(0),
            name: name.into(),
            title: title.into(),
            era: String::new(),
            persona_prompt: persona_prompt.into(),
            personality_traits: Vec::new(),
            core_beliefs: Vec::new(),
            expertise_areas: Vec::new(),
            speaking_style: String::new(),
            is_active: true,
            status: DirectorStatus::Active,
            total_statements: 0,
            total_meetings: 0,
            last_active: None,
        }
    }

    pub fn with_era(mut self, era: impl Into<String>) -> Self {
        self.era = era.into();
        self
    }

    pub fn with_speaking_style(mut self, style: impl Into<String>) -> Self {
        self.speaking_style = style.into();
        self
    }

    /// Whether this director may join new meetings or produce statements.
    pub fn is_available(&self) -> bool {
        self.is_active && self.status == DirectorStatus::Active
    }

    /// Record that this director produced a statement.
    pub fn record_statement(&mut self, now: DateTime<Utc>) {
        self.total_statements += 1;
        self.last_active = Some(now);
    }

    /// Record that this director joined a meeting.
    pub fn record_meeting(&mut self) {
        self.total_meetings += 1;
    }

    /// Soft delete: archive the director instead of removing the record.
    pub fn archive(&mut self) {
        self.status = DirectorStatus::Archived;
        self.is_active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_director_is_available() {
        let d = Director::new("Ada Lovelace", "Mathematician", "You are Ada Lovelace.");
        assert!(d.is_available());
        assert_eq!(d.total_statements, 0);
    }

    #[test]
    fn test_archived_director_is_not_available() {
        let mut d = Director::new("Ada Lovelace", "Mathematician", "You are Ada Lovelace.");
        d.archive();
        assert!(!d.is_available());
        assert_eq!(d.status, DirectorStatus::Archived);
    }

    #[test]
    fn test_record_statement_updates_counters() {
        let mut d = Director::new("Sun Tzu", "Strategist", "You are Sun Tzu.");
        let now = Utc::now();
        d.record_statement(now);
        d.record_statement(now);
        assert_eq!(d.total_statements, 2);
        assert_eq!(d.last_active, Some(now));
    }
}
