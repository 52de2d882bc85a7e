//! Text generation adapters

pub mod budget;
pub mod fallback;
pub mod gateway;

pub use budget::{BudgetDecision, TokenBudget};
pub use fallback::{FALLBACK_MODEL, fallback_text};
pub use gateway::{ChatCompletionsGateway, GatewayConfig};
