//! Domain layer for boardroom
//!
//! Core entities and pure logic of the meeting discussion engine:
//!
//! - **Directors**: persona definitions with a system prompt that drives
//!   their voice.
//! - **Meetings**: discussion sessions with a status state machine and a
//!   round counter.
//! - **Participants**: meeting membership records carrying the speaking
//!   order.
//! - **Statements**: immutable transcript entries.
//! - **Speaker selection**: who talks next, per discussion mode.
//! - **Prompt composition**: deterministic construction of the text sent to
//!   the generation gateway.
//!
//! This crate performs no I/O and has no async surface; orchestration and
//! persistence live in the application and infrastructure layers.

pub mod director;
pub mod ids;
pub mod meeting;
pub mod participant;
pub mod prompt;
pub mod selection;
pub mod statement;

// Re-export commonly used types
pub use director::{Director, DirectorStatus};
pub use ids::{DirectorId, MeetingId, StatementId};
pub use meeting::{DiscussionMode, Meeting, MeetingStatus};
pub use participant::{Participant, ParticipantStatus};
pub use prompt::{MAX_CONTEXT_STATEMENTS, PromptComposer, TranscriptEntry};
pub use selection::{SelectionError, SpeakerChoice, next_speaker};
pub use statement::{Statement, StatementKind, reply_chain};
