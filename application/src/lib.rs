//! Application layer for boardroom
//!
//! Defines the ports the meeting engine consumes (stores, text generation)
//! and the [`MeetingOrchestrator`] use case that drives meetings through
//! their state machine. Adapters for the ports live in the infrastructure
//! layer.

pub mod ports;
pub mod use_cases;

pub use ports::{
    DirectorStore, GeneratedText, GenerationRequest, MeetingStore, StoreError, TextGenerator,
};
pub use use_cases::{AdvanceRequest, CreateMeeting, MeetingOrchestrator, OrchestratorError};
