//! Configuration management for the CV enhancer

use crate::diff::DiffOptions;
use crate::error::{CvEnhancerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub enhancement: EnhancementConfig,
    pub diff: DiffConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Chat completions endpoint.
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub max_retries: u32,
    pub timeout_secs: u64,
    /// Environment variable holding the API key. The key itself never
    /// lives in the config file.
    pub api_key_env: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnhancementConfig {
    /// Append the target-program alignment sentence in the offline fallback.
    pub append_target_sentence: bool,
    /// Minimum sentence length for bullet point extraction.
    pub min_bullet_chars: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffConfig {
    /// How many words ahead to search for a resynchronization point.
    pub lookahead: usize,
    /// Compare words case-insensitively.
    pub ignore_case: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color: bool,
    pub legend: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Plain,
    Json,
    Markdown,
    Html,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
                model: "gpt-4o-mini".to_string(),
                temperature: 0.7,
                max_tokens: 1000,
                max_retries: 3,
                timeout_secs: 60,
                api_key_env: "OPENAI_API_KEY".to_string(),
            },
            enhancement: EnhancementConfig::default(),
            diff: DiffConfig::default(),
            output: OutputConfig {
                format: OutputFormat::Console,
                color: true,
                legend: true,
            },
        }
    }
}

impl Default for EnhancementConfig {
    fn default() -> Self {
        Self {
            append_target_sentence: true,
            min_bullet_chars: 10,
        }
    }
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            lookahead: 3,
            ignore_case: true,
        }
    }
}

impl From<&DiffConfig> for DiffOptions {
    fn from(config: &DiffConfig) -> Self {
        DiffOptions {
            lookahead: config.lookahead,
            ignore_case: config.ignore_case,
        }
    }
}

impl Config {
    /// Load from the default location, or from `override_path` when given.
    /// A missing file is created with defaults.
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let config_path = match override_path {
            Some(path) => path.to_path_buf(),
            None => Self::config_path(),
        };
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content).map_err(|e| {
                CvEnhancerError::Configuration(format!("Failed to parse config: {}", e))
            })?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            CvEnhancerError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("cv-enhancer")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.api.model, "gpt-4o-mini");
        assert_eq!(config.api.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.diff.lookahead, 3);
        assert!(config.diff.ignore_case);
        assert_eq!(config.output.format, OutputFormat::Console);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = Config::default();
        let toml_text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_text).unwrap();
        assert_eq!(parsed.api.endpoint, config.api.endpoint);
        assert_eq!(parsed.diff.lookahead, config.diff.lookahead);
        assert_eq!(parsed.enhancement.min_bullet_chars, 10);
    }

    #[test]
    fn test_load_creates_missing_file_with_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config::load_from(&path).unwrap();

        assert!(path.exists());
        assert_eq!(config.api.model, "gpt-4o-mini");

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.api.model, config.api.model);
    }

    #[test]
    fn test_diff_options_from_config() {
        let diff_config = DiffConfig {
            lookahead: 5,
            ignore_case: false,
        };
        let options = DiffOptions::from(&diff_config);
        assert_eq!(options.lookahead, 5);
        assert!(!options.ignore_case);
    }
}
