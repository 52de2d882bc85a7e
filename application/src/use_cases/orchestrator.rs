//! Meeting orchestrator use case
//!
//! Owns the meeting state machine. Each operation is one synchronous state
//! transition: nothing advances a meeting except an explicit call, because
//! generation is slow and billed per token, so progression stays
//! caller-paced. The only blocking step is the gateway call, which the
//! adapter bounds with a timeout and a fallback.
//!
//! Every mutating operation serializes on a per-meeting lock around its
//! select → compose → generate → persist → update-counters sequence.

use crate::ports::{
    DirectorStore, GeneratedText, GenerationRequest, MeetingStore, StoreError, TextGenerator,
};
use crate::use_cases::locks::MeetingLocks;
use boardroom_domain::{
    Director, DirectorId, DiscussionMode, Meeting, MeetingId, MeetingStatus, Participant,
    PromptComposer, SelectionError, Statement, StatementId, StatementKind, TranscriptEntry,
    next_speaker, reply_chain,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors surfaced by orchestrator operations.
///
/// Generation-provider failures never appear here: the gateway absorbs them
/// and the resulting statement simply carries `ai_generated = false`.
#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("unknown or unavailable directors: {0:?}")]
    DirectorsInvalid(Vec<DirectorId>),

    #[error("too many participants: {given} exceeds the limit of {max}")]
    TooManyParticipants { given: usize, max: u32 },

    #[error("cannot {action} while the meeting is {from}")]
    InvalidTransition {
        from: MeetingStatus,
        action: &'static str,
    },

    #[error("meeting {0} not found")]
    MeetingNotFound(MeetingId),

    #[error("statement {0} not found in this meeting")]
    StatementNotFound(StatementId),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Input for [`MeetingOrchestrator::create`].
///
/// Deserializable so the API layer can take it straight from a request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMeeting {
    pub title: String,
    pub topic: String,
    pub mode: DiscussionMode,
    pub max_rounds: u32,
    pub max_participants: u32,
    /// Directors in speaking order; join_order follows list position.
    pub director_ids: Vec<DirectorId>,
}

/// Options for [`MeetingOrchestrator::advance`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvanceRequest {
    /// Bypass the speaker selector and let this director speak now. Used for
    /// user-directed questions and debate rebuttals.
    pub forced_director: Option<DirectorId>,
    /// Statement being replied to; marks the new statement as a response.
    pub response_to: Option<StatementId>,
}

impl AdvanceRequest {
    pub fn forced(director: DirectorId) -> Self {
        Self {
            forced_director: Some(director),
            response_to: None,
        }
    }

    pub fn rebuttal(director: DirectorId, response_to: StatementId) -> Self {
        Self {
            forced_director: Some(director),
            response_to: Some(response_to),
        }
    }
}

/// The meeting discussion engine.
pub struct MeetingOrchestrator {
    directors: Arc<dyn DirectorStore>,
    meetings: Arc<dyn MeetingStore>,
    generator: Arc<dyn TextGenerator>,
    locks: MeetingLocks,
}

impl MeetingOrchestrator {
    pub fn new(
        directors: Arc<dyn DirectorStore>,
        meetings: Arc<dyn MeetingStore>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            directors,
            meetings,
            generator,
            locks: MeetingLocks::new(),
        }
    }

    /// Create a meeting in `preparing` with one participant per director, in
    /// list order.
    pub async fn create(&self, input: CreateMeeting) -> Result<Meeting, OrchestratorError> {
        if input.title.trim().is_empty() {
            return Err(OrchestratorError::Validation("title is required".into()));
        }
        if input.topic.trim().is_empty() {
            return Err(OrchestratorError::Validation("topic is required".into()));
        }
        if input.max_rounds == 0 {
            return Err(OrchestratorError::Validation(
                "max_rounds must be at least 1".into(),
            ));
        }
        if input.director_ids.is_empty() {
            return Err(OrchestratorError::Validation(
                "at least one director is required".into(),
            ));
        }
        if input.director_ids.len() > input.max_participants as usize {
            return Err(OrchestratorError::TooManyParticipants {
                given: input.director_ids.len(),
                max: input.max_participants,
            });
        }
        let mut seen = std::collections::HashSet::new();
        for id in &input.director_ids {
            if !seen.insert(*id) {
                return Err(OrchestratorError::Validation(format!(
                    "director {id} listed more than once"
                )));
            }
        }

        let found = self.directors.get_many(&input.director_ids).await?;
        let by_id: HashMap<DirectorId, &Director> = found.iter().map(|d| (d.id, d)).collect();
        let invalid: Vec<DirectorId> = input
            .director_ids
            .iter()
            .filter(|id| !by_id.get(id).map(|d| d.is_available()).unwrap_or(false))
            .copied()
            .collect();
        if !invalid.is_empty() {
            return Err(OrchestratorError::DirectorsInvalid(invalid));
        }

        let mut meeting = Meeting::new(
            input.title,
            input.topic,
            input.mode,
            input.max_rounds,
            input.max_participants,
        );
        meeting.total_participants = input.director_ids.len() as u32;
        let meeting = self.meetings.insert_meeting(meeting).await?;

        for (i, director_id) in input.director_ids.iter().enumerate() {
            let participant = Participant::new(meeting.id, *director_id, i as u32 + 1);
            self.meetings.insert_participant(participant).await?;

            let mut director = by_id[director_id].clone();
            director.record_meeting();
            self.directors.update(&director).await?;
        }

        info!(
            meeting = %meeting.id,
            mode = %meeting.discussion_mode,
            participants = meeting.total_participants,
            "meeting created"
        );
        Ok(meeting)
    }

    /// Start a preparing meeting: generates the opening statement from the
    /// first participant and moves the meeting to its active status.
    pub async fn start(&self, id: MeetingId) -> Result<Meeting, OrchestratorError> {
        let lock = self.locks.lock_for(id);
        let _guard = lock.lock().await;

        let mut meeting = self.require_meeting(id).await?;
        if meeting.status != MeetingStatus::Preparing {
            return Err(OrchestratorError::InvalidTransition {
                from: meeting.status,
                action: "start",
            });
        }

        let roster = self.active_roster(id).await?;
        let mut speaker = roster
            .first()
            .cloned()
            .ok_or(SelectionError::NoActiveParticipants)?;
        let mut director = self.require_director(speaker.director_id).await?;

        let prompt = PromptComposer::opening(&director, &meeting);
        let generated = self
            .generator
            .generate(&GenerationRequest::new(&director.persona_prompt, prompt))
            .await;

        let statement = self
            .persist_turn(
                &mut meeting,
                &mut speaker,
                &mut director,
                StatementKind::Opening,
                1,
                None,
                generated,
            )
            .await?;

        meeting.status = meeting.active_status();
        meeting.started_at = Some(Utc::now());
        self.meetings.update_meeting(&meeting).await?;

        info!(meeting = %meeting.id, speaker = %director.name, "meeting started");
        debug!(statement = %statement.id, "opening statement persisted");
        Ok(meeting)
    }

    /// Generate the next statement. The selector picks the speaker unless a
    /// forced director is supplied. Performs round rollover after persisting.
    pub async fn advance(
        &self,
        id: MeetingId,
        request: AdvanceRequest,
    ) -> Result<Statement, OrchestratorError> {
        let lock = self.locks.lock_for(id);
        let _guard = lock.lock().await;

        let mut meeting = self.require_meeting(id).await?;
        if !meeting.status.is_active() {
            return Err(OrchestratorError::InvalidTransition {
                from: meeting.status,
                action: "advance",
            });
        }

        let roster = self.active_roster(id).await?;
        let statements_this_round = self
            .meetings
            .statements(id, Some(meeting.current_round))
            .await?;

        let (speaker_index, sequence_in_round) = match request.forced_director {
            Some(director_id) => {
                let index = roster
                    .iter()
                    .position(|p| p.director_id == director_id)
                    .ok_or_else(|| {
                        OrchestratorError::Validation(format!(
                            "director {director_id} is not an active participant"
                        ))
                    })?;
                (index, statements_this_round.len() as u32 + 1)
            }
            None => {
                let choice = next_speaker(
                    meeting.discussion_mode,
                    &roster,
                    &statements_this_round,
                    &mut rand::thread_rng(),
                )?;
                (choice.index, choice.sequence_in_round)
            }
        };
        let mut speaker = roster[speaker_index].clone();
        let mut director = self.require_director(speaker.director_id).await?;

        let all_statements = self.meetings.statements(id, None).await?;
        if let Some(target) = request.response_to {
            if !all_statements.iter().any(|s| s.id == target) {
                return Err(OrchestratorError::StatementNotFound(target));
            }
        }
        let kind = if request.response_to.is_some() {
            StatementKind::Response
        } else {
            StatementKind::Statement
        };

        let context = self.context_entries(&all_statements).await?;
        let prompt = PromptComposer::turn(&director, &meeting, sequence_in_round, &context);
        let generated = self
            .generator
            .generate(&GenerationRequest::new(&director.persona_prompt, prompt))
            .await;

        let statement = self
            .persist_turn(
                &mut meeting,
                &mut speaker,
                &mut director,
                kind,
                sequence_in_round,
                request.response_to,
                generated,
            )
            .await?;

        // Round rollover: the round is full once every active participant
        // had a slot in it.
        let in_round = statements_this_round.len() as u32 + 1;
        if in_round >= roster.len() as u32 && meeting.current_round < meeting.max_rounds {
            meeting.current_round += 1;
            debug!(meeting = %meeting.id, round = meeting.current_round, "round rollover");
        }
        self.meetings.update_meeting(&meeting).await?;

        info!(
            meeting = %meeting.id,
            speaker = %director.name,
            round = statement.round_number,
            seq = statement.sequence_in_round,
            ai = statement.ai_generated,
            "statement generated"
        );
        Ok(statement)
    }

    /// Pause an active meeting.
    pub async fn pause(&self, id: MeetingId) -> Result<Meeting, OrchestratorError> {
        let lock = self.locks.lock_for(id);
        let _guard = lock.lock().await;

        let mut meeting = self.require_meeting(id).await?;
        if !meeting.status.is_active() {
            return Err(OrchestratorError::InvalidTransition {
                from: meeting.status,
                action: "pause",
            });
        }
        meeting.status = MeetingStatus::Paused;
        meeting.paused_at = Some(Utc::now());
        self.meetings.update_meeting(&meeting).await?;

        info!(meeting = %meeting.id, "meeting paused");
        Ok(meeting)
    }

    /// Resume a paused meeting into its mode-appropriate active status.
    pub async fn resume(&self, id: MeetingId) -> Result<Meeting, OrchestratorError> {
        let lock = self.locks.lock_for(id);
        let _guard = lock.lock().await;

        let mut meeting = self.require_meeting(id).await?;
        if meeting.status != MeetingStatus::Paused {
            return Err(OrchestratorError::InvalidTransition {
                from: meeting.status,
                action: "resume",
            });
        }
        meeting.status = meeting.active_status();
        self.meetings.update_meeting(&meeting).await?;

        info!(meeting = %meeting.id, "meeting resumed");
        Ok(meeting)
    }

    /// Finish a meeting from any non-finished status. Generates a closing
    /// statement from the last participant; an empty roster finishes without
    /// one.
    pub async fn finish(&self, id: MeetingId) -> Result<Meeting, OrchestratorError> {
        let lock = self.locks.lock_for(id);
        let _guard = lock.lock().await;

        let mut meeting = self.require_meeting(id).await?;
        if meeting.status == MeetingStatus::Finished {
            return Err(OrchestratorError::InvalidTransition {
                from: meeting.status,
                action: "finish",
            });
        }

        let roster = self.active_roster(id).await?;
        if let Some(last) = roster.last() {
            let mut speaker = last.clone();
            let mut director = self.require_director(speaker.director_id).await?;

            let all_statements = self.meetings.statements(id, None).await?;
            let in_round = all_statements
                .iter()
                .filter(|s| s.round_number == meeting.current_round)
                .count() as u32;

            let context = self.context_entries(&all_statements).await?;
            let prompt = PromptComposer::closing(&director, &meeting, &context);
            let generated = self
                .generator
                .generate(&GenerationRequest::new(&director.persona_prompt, prompt))
                .await;

            // Closing appends to the current round and never triggers
            // rollover.
            self.persist_turn(
                &mut meeting,
                &mut speaker,
                &mut director,
                StatementKind::Closing,
                in_round + 1,
                None,
                generated,
            )
            .await?;
        }

        // Re-read: the closing speaker's counters changed above.
        let now = Utc::now();
        for participant in self.meetings.participants(id).await? {
            if participant.has_left() {
                continue;
            }
            let mut p = participant;
            p.status = boardroom_domain::ParticipantStatus::Finished;
            self.meetings.update_participant(&p).await?;
        }

        meeting.status = MeetingStatus::Finished;
        meeting.ended_at = Some(now);
        self.meetings.update_meeting(&meeting).await?;

        info!(meeting = %meeting.id, "meeting finished");
        Ok(meeting)
    }

    /// Add a director to a preparing or paused meeting.
    pub async fn add_participant(
        &self,
        id: MeetingId,
        director_id: DirectorId,
    ) -> Result<Participant, OrchestratorError> {
        let lock = self.locks.lock_for(id);
        let _guard = lock.lock().await;

        let mut meeting = self.require_meeting(id).await?;
        if !matches!(
            meeting.status,
            MeetingStatus::Preparing | MeetingStatus::Paused
        ) {
            return Err(OrchestratorError::InvalidTransition {
                from: meeting.status,
                action: "add a participant",
            });
        }

        let director = self
            .directors
            .get(director_id)
            .await?
            .filter(|d| d.is_available())
            .ok_or_else(|| OrchestratorError::DirectorsInvalid(vec![director_id]))?;

        let participants = self.meetings.participants(id).await?;
        if participants.iter().any(|p| p.director_id == director_id) {
            return Err(OrchestratorError::Validation(format!(
                "director {director_id} is already a participant"
            )));
        }
        let present = participants.iter().filter(|p| !p.has_left()).count();
        if present >= meeting.max_participants as usize {
            return Err(OrchestratorError::TooManyParticipants {
                given: present + 1,
                max: meeting.max_participants,
            });
        }

        let join_order = participants.iter().map(|p| p.join_order).max().unwrap_or(0) + 1;
        let participant = Participant::new(id, director_id, join_order);
        self.meetings.insert_participant(participant.clone()).await?;

        let mut director = director;
        director.record_meeting();
        self.directors.update(&director).await?;

        meeting.total_participants = present as u32 + 1;
        self.meetings.update_meeting(&meeting).await?;

        info!(meeting = %id, director = %director.name, join_order, "participant added");
        Ok(participant)
    }

    /// Remove a director from a meeting: hard removal while preparing, a
    /// soft `leave` once the meeting has started.
    pub async fn remove_participant(
        &self,
        id: MeetingId,
        director_id: DirectorId,
    ) -> Result<(), OrchestratorError> {
        let lock = self.locks.lock_for(id);
        let _guard = lock.lock().await;

        let mut meeting = self.require_meeting(id).await?;
        if meeting.status == MeetingStatus::Finished {
            return Err(OrchestratorError::InvalidTransition {
                from: meeting.status,
                action: "remove a participant",
            });
        }

        let participants = self.meetings.participants(id).await?;
        let participant = participants
            .iter()
            .find(|p| p.director_id == director_id)
            .ok_or_else(|| {
                OrchestratorError::Validation(format!(
                    "director {director_id} is not a participant"
                ))
            })?;

        if meeting.status == MeetingStatus::Preparing {
            self.meetings.delete_participant(id, director_id).await?;
        } else {
            let mut p = participant.clone();
            p.leave(Utc::now());
            self.meetings.update_participant(&p).await?;
        }

        let remaining = self.meetings.participants(id).await?;
        meeting.total_participants = remaining.iter().filter(|p| !p.has_left()).count() as u32;
        self.meetings.update_meeting(&meeting).await?;

        info!(meeting = %id, director = %director_id, "participant removed");
        Ok(())
    }

    /// Fetch one meeting.
    pub async fn meeting(&self, id: MeetingId) -> Result<Meeting, OrchestratorError> {
        self.require_meeting(id).await
    }

    /// List all meetings.
    pub async fn list_meetings(&self) -> Result<Vec<Meeting>, OrchestratorError> {
        Ok(self.meetings.list_meetings().await?)
    }

    /// Participants of a meeting, ordered by join order.
    pub async fn participants(&self, id: MeetingId) -> Result<Vec<Participant>, OrchestratorError> {
        self.require_meeting(id).await?;
        Ok(self.meetings.participants(id).await?)
    }

    /// Statements of a meeting, optionally filtered to one round.
    pub async fn statements(
        &self,
        id: MeetingId,
        round: Option<u32>,
    ) -> Result<Vec<Statement>, OrchestratorError> {
        self.require_meeting(id).await?;
        Ok(self.meetings.statements(id, round).await?)
    }

    /// The reply chain of a statement, starting at the statement itself.
    pub async fn statement_thread(
        &self,
        id: MeetingId,
        statement_id: StatementId,
    ) -> Result<Vec<Statement>, OrchestratorError> {
        let statements = self.meetings.statements(id, None).await?;
        if !statements.iter().any(|s| s.id == statement_id) {
            return Err(OrchestratorError::StatementNotFound(statement_id));
        }
        Ok(reply_chain(&statements, statement_id)
            .into_iter()
            .cloned()
            .collect())
    }

    // ---- internals -------------------------------------------------------

    async fn require_meeting(&self, id: MeetingId) -> Result<Meeting, OrchestratorError> {
        self.meetings
            .meeting(id)
            .await?
            .ok_or(OrchestratorError::MeetingNotFound(id))
    }

    async fn require_director(&self, id: DirectorId) -> Result<Director, OrchestratorError> {
        self.directors
            .get(id)
            .await?
            .ok_or_else(|| OrchestratorError::DirectorsInvalid(vec![id]))
    }

    /// Active participants of a meeting, ordered by join order.
    async fn active_roster(&self, id: MeetingId) -> Result<Vec<Participant>, OrchestratorError> {
        let participants = self.meetings.participants(id).await?;
        Ok(participants
            .into_iter()
            .filter(|p| p.is_active && !p.has_left())
            .collect())
    }

    /// Annotate the transcript tail with speaker names for prompt context.
    async fn context_entries(
        &self,
        statements: &[Statement],
    ) -> Result<Vec<TranscriptEntry>, OrchestratorError> {
        let start = statements
            .len()
            .saturating_sub(boardroom_domain::MAX_CONTEXT_STATEMENTS);
        let tail = &statements[start..];

        let mut speaker_ids: Vec<DirectorId> = tail.iter().map(|s| s.director_id).collect();
        speaker_ids.sort();
        speaker_ids.dedup();
        let speakers = self.directors.get_many(&speaker_ids).await?;
        let by_id: HashMap<DirectorId, &Director> = speakers.iter().map(|d| (d.id, d)).collect();

        Ok(tail
            .iter()
            .map(|s| {
                let (name, title) = by_id
                    .get(&s.director_id)
                    .map(|d| (d.name.clone(), d.title.clone()))
                    .unwrap_or_else(|| (format!("Director {}", s.director_id), String::new()));
                TranscriptEntry::new(name, title, s.content.clone())
            })
            .collect())
    }

    /// Persist a generated statement and update the speaking participant's,
    /// the director's and the meeting's counters. The meeting record itself
    /// is written by the caller after any status/round changes.
    #[allow(clippy::too_many_arguments)]
    async fn persist_turn(
        &self,
        meeting: &mut Meeting,
        participant: &mut Participant,
        director: &mut Director,
        kind: StatementKind,
        sequence_in_round: u32,
        response_to: Option<StatementId>,
        generated: GeneratedText,
    ) -> Result<Statement, OrchestratorError> {
        let now = Utc::now();
        let statement = Statement {
            id: StatementId(0),
            meeting_id: meeting.id,
            director_id: director.id,
            content: generated.content,
            kind,
            round_number: meeting.current_round,
            sequence_in_round,
            response_to,
            tokens_used: generated.tokens_used,
            generation_time_ms: generated.generation_time_ms,
            model: generated.model,
            ai_generated: generated.ai_generated,
            created_at: now,
        };
        let statement = self.meetings.insert_statement(statement).await?;

        participant.record_statement(statement.tokens_used, now);
        self.meetings.update_participant(participant).await?;

        director.record_statement(now);
        self.directors.update(director).await?;

        meeting.total_statements += 1;
        Ok(statement)
    }
}
