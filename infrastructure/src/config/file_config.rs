//! Raw TOML configuration data types
//!
//! These structs mirror the structure of `boardroom.toml` and are
//! deserialized directly. Conversions into the richer runtime types live
//! next to the raw types.

use crate::llm::GatewayConfig;
use boardroom_domain::Director;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Text generation provider settings.
    pub gateway: FileGatewayConfig,
    /// Defaults for newly created meetings.
    pub meeting: FileMeetingConfig,
    /// Directors seeded into the store on startup (demo binary).
    pub directors: Vec<FileDirectorConfig>,
}

/// `[gateway]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGatewayConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout_secs: u64,
    pub daily_token_limit: u64,
}

impl Default for FileGatewayConfig {
    fn default() -> Self {
        let defaults = GatewayConfig::default();
        Self {
            api_key: None,
            base_url: defaults.base_url,
            model: defaults.model,
            max_tokens: defaults.max_tokens,
            timeout_secs: defaults.timeout_secs,
            daily_token_limit: defaults.daily_token_limit,
        }
    }
}

impl From<FileGatewayConfig> for GatewayConfig {
    fn from(file: FileGatewayConfig) -> Self {
        Self {
            api_key: file.api_key,
            base_url: file.base_url,
            model: file.model,
            max_tokens: file.max_tokens,
            timeout_secs: file.timeout_secs,
            daily_token_limit: file.daily_token_limit,
        }
    }
}

/// `[meeting]` section: defaults applied when the caller does not specify.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileMeetingConfig {
    pub mode: String,
    pub max_rounds: u32,
    pub max_participants: u32,
}

impl Default for FileMeetingConfig {
    fn default() -> Self {
        Self {
            mode: "round_robin".to_string(),
            max_rounds: 3,
            max_participants: 8,
        }
    }
}

/// `[[directors]]` entries: persona seeds for the demo binary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDirectorConfig {
    pub name: String,
    pub title: String,
    pub era: String,
    pub persona_prompt: String,
    pub speaking_style: String,
}

impl From<FileDirectorConfig> for Director {
    fn from(file: FileDirectorConfig) -> Self {
        Director::new(file.name, file.title, file.persona_prompt)
            .with_era(file.era)
            .with_speaking_style(file.speaking_style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_sane() {
        let config = FileConfig::default();
        assert!(config.gateway.api_key.is_none());
        assert_eq!(config.meeting.mode, "round_robin");
        assert!(config.directors.is_empty());
    }

    #[test]
    fn test_director_conversion() {
        let file = FileDirectorConfig {
            name: "Cleopatra".to_string(),
            title: "Pharaoh".to_string(),
            era: "Ptolemaic Egypt".to_string(),
            persona_prompt: "You are Cleopatra VII.".to_string(),
            speaking_style: "regal, pointed".to_string(),
        };
        let director: Director = file.into();
        assert_eq!(director.name, "Cleopatra");
        assert_eq!(director.era, "Ptolemaic Egypt");
        assert!(director.is_available());
    }
}
