//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::PathBuf;

/// Configuration loader that handles file discovery and merging.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority.
    ///
    /// Priority (highest to lowest):
    /// 1. `BOARDROOM_*` environment variables
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./boardroom.toml` or `./.boardroom.toml`
    /// 4. Global: `~/.config/boardroom/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(&global_path));
            }
        }

        for filename in &["boardroom.toml", ".boardroom.toml"] {
            let path = PathBuf::from(filename);
            if path.exists() {
                figment = figment.merge(Toml::file(&path));
                break;
            }
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // BOARDROOM_GATEWAY__API_KEY=... maps to [gateway] api_key
        figment = figment.merge(Env::prefixed("BOARDROOM_").split("__"));

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration.
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// The global config file path.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("boardroom").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert!(config.gateway.api_key.is_none());
        assert_eq!(config.meeting.max_rounds, 3);
    }

    #[test]
    fn test_explicit_path_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[gateway]
model = "gpt-4o"
daily_token_limit = 5000

[[directors]]
name = "Ada Lovelace"
title = "Mathematician"
persona_prompt = "You are Ada Lovelace."
"#
        )
        .unwrap();

        let config = ConfigLoader::load(Some(&path)).unwrap();
        assert_eq!(config.gateway.model, "gpt-4o");
        assert_eq!(config.gateway.daily_token_limit, 5000);
        // Untouched values keep their defaults.
        assert_eq!(config.gateway.max_tokens, 300);
        assert_eq!(config.directors.len(), 1);
        assert_eq!(config.directors[0].name, "Ada Lovelace");
    }
}
