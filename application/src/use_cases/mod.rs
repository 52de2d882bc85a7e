//! Use cases

pub mod locks;
pub mod orchestrator;

pub use locks::MeetingLocks;
pub use orchestrator::{AdvanceRequest, CreateMeeting, MeetingOrchestrator, OrchestratorError};
