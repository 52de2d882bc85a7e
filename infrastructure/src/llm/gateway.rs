//! Chat-completions gateway
//!
//! Adapter for the [`TextGenerator`] port against any OpenAI-compatible
//! chat-completions endpoint. All provider failure modes (missing
//! credential, exhausted budget, HTTP errors, timeouts, malformed payloads)
//! are absorbed here and converted into deterministic fallback text; the
//! orchestrator never sees a generation error.

use super::budget::TokenBudget;
use super::fallback::{FALLBACK_MODEL, fallback_text};
use async_trait::async_trait;
use boardroom_application::ports::{GeneratedText, GenerationRequest, TextGenerator};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

/// Gateway configuration, supplied by the config layer.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Provider credential. Absent or placeholder means unconfigured.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    /// Per-request output token cap.
    pub max_tokens: u32,
    /// Bound on one provider call; a timed-out call is not retried.
    pub timeout_secs: u64,
    pub daily_token_limit: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            max_tokens: 300,
            timeout_secs: 30,
            daily_token_limit: 100_000,
        }
    }
}

#[derive(Error, Debug)]
enum ProviderError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response shape: {0}")]
    Malformed(String),
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[derive(Deserialize)]
struct ChatUsage {
    total_tokens: u64,
}

/// [`TextGenerator`] adapter over an OpenAI-compatible provider.
pub struct ChatCompletionsGateway {
    config: GatewayConfig,
    client: reqwest::Client,
    budget: TokenBudget,
}

impl ChatCompletionsGateway {
    pub fn new(config: GatewayConfig) -> Self {
        let budget = TokenBudget::new(config.daily_token_limit);
        Self::with_budget(config, budget)
    }

    /// Construct with an externally owned budget (used by tests to control
    /// the counter).
    pub fn with_budget(config: GatewayConfig, budget: TokenBudget) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
            budget,
        }
    }

    pub fn budget(&self) -> &TokenBudget {
        &self.budget
    }

    fn fallback(&self, request: &GenerationRequest) -> GeneratedText {
        GeneratedText {
            content: fallback_text(&request.prompt).to_string(),
            tokens_used: 0,
            generation_time_ms: 0,
            model: FALLBACK_MODEL.to_string(),
            ai_generated: false,
        }
    }

    /// Rough size estimate for the budget check: prompt characters at ~4 per
    /// token, plus the full output cap.
    fn estimate_tokens(&self, request: &GenerationRequest) -> u64 {
        let input = (request.system_prompt.len() + request.prompt.len()) as u64 / 4;
        input + self.config.max_tokens as u64
    }

    async fn call_provider(
        &self,
        request: &GenerationRequest,
    ) -> Result<(String, u64), ProviderError> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            max_tokens: self.config.max_tokens,
        };

        let key = self.config.api_key.as_deref().unwrap_or_default();
        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json::<ChatResponse>()
            .await?;

        let content = response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ProviderError::Malformed("no choices in response".to_string()))?;
        if content.trim().is_empty() {
            return Err(ProviderError::Malformed("empty completion".to_string()));
        }
        let tokens = response.usage.map(|u| u.total_tokens).unwrap_or(0);
        Ok((content, tokens))
    }
}

#[async_trait]
impl TextGenerator for ChatCompletionsGateway {
    fn is_configured(&self) -> bool {
        match self.config.api_key.as_deref() {
            Some(key) => {
                let key = key.trim();
                !key.is_empty()
                    && !key.contains("...")
                    && !key.to_lowercase().starts_with("your")
                    && key.to_lowercase() != "changeme"
            }
            None => false,
        }
    }

    async fn generate(&self, request: &GenerationRequest) -> GeneratedText {
        if !self.is_configured() {
            debug!("no provider credential, using fallback text");
            return self.fallback(request);
        }

        let decision = self.budget.check(self.estimate_tokens(request));
        if !decision.allowed {
            warn!(
                remaining = decision.remaining,
                "daily token budget exhausted, using fallback text"
            );
            return self.fallback(request);
        }

        let started = Instant::now();
        let timeout = Duration::from_secs(self.config.timeout_secs);
        match tokio::time::timeout(timeout, self.call_provider(request)).await {
            Ok(Ok((content, tokens))) => {
                self.budget.record(tokens);
                GeneratedText {
                    content,
                    tokens_used: tokens,
                    generation_time_ms: started.elapsed().as_millis() as u64,
                    model: self.config.model.clone(),
                    ai_generated: true,
                }
            }
            Ok(Err(e)) => {
                warn!("provider call failed, using fallback text: {e}");
                self.fallback(request)
            }
            // Not retried: a retry could double-bill a generation that did
            // complete on the provider side.
            Err(_) => {
                warn!(timeout_secs = self.config.timeout_secs, "provider call timed out");
                self.fallback(request)
            }
        }
    }
}
