//! Ports (interfaces) for external collaborators
//!
//! The orchestrator talks to storage and to the text generation provider
//! exclusively through these traits. Adapters live in the infrastructure
//! layer.

pub mod director_store;
pub mod meeting_store;
pub mod text_generation;

pub use director_store::DirectorStore;
pub use meeting_store::MeetingStore;
pub use text_generation::{GeneratedText, GenerationRequest, TextGenerator};

use thiserror::Error;

/// Errors from the persistence ports.
///
/// Store failures are infrastructure problems: they abort the current
/// operation and propagate to the caller as retryable errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("constraint violated: {0}")]
    Constraint(String),
}
