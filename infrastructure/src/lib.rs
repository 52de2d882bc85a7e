//! Infrastructure layer for boardroom
//!
//! Adapters for the application ports: in-memory stores, the
//! chat-completions text generation gateway with its daily token budget and
//! fallback path, and figment-based configuration loading.

pub mod config;
pub mod llm;
pub mod stores;

pub use config::{ConfigLoader, FileConfig};
pub use llm::{ChatCompletionsGateway, GatewayConfig, TokenBudget};
pub use stores::{InMemoryDirectorStore, InMemoryMeetingStore};
