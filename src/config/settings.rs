// Configuration structs

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use super::constants::*;

/// Which generation service implementation to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorMode {
    /// OpenAI-compatible HTTP API (requires an API key)
    #[default]
    Live,
    /// Deterministic canned responses, no network
    Offline,
}

/// Live generator settings (`[openai]` table)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiSettings {
    /// API key; usually supplied through OPENAI_API_KEY
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    /// Per-request timeout
    pub timeout_secs: u64,
    /// Attempts per call, including the first
    pub max_attempts: u32,
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: REQUEST_TIMEOUT_SECS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Story loop settings (`[story]` table)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorySettings {
    /// Judge + revise rounds per request
    pub rounds: usize,
}

impl Default for StorySettings {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_ROUNDS,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub mode: GeneratorMode,
    pub openai: OpenAiSettings,
    pub story: StorySettings,
}

impl Config {
    /// Parse a TOML document; missing tables and keys take defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Overlay environment variables, read through `lookup`.
    ///
    /// `USE_MOCK` accepts `1`, `true` or `yes` (case-insensitive) and only
    /// ever switches to offline mode.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(ENV_API_KEY).filter(|k| !k.trim().is_empty()) {
            self.openai.api_key = Some(key);
        }
        if let Some(url) = lookup(ENV_BASE_URL).filter(|u| !u.trim().is_empty()) {
            self.openai.base_url = url;
        }
        if lookup(ENV_OFFLINE).is_some_and(|v| is_truthy(&v)) {
            self.mode = GeneratorMode::Offline;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.story.rounds > MAX_ROUNDS {
            bail!(
                "story.rounds must be at most {} (got {})",
                MAX_ROUNDS,
                self.story.rounds
            );
        }
        if self.openai.timeout_secs == 0 {
            bail!("openai.timeout_secs must be greater than zero");
        }
        if self.openai.model.trim().is_empty() {
            bail!("openai.model must not be empty");
        }
        Ok(())
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.mode, GeneratorMode::Live);
        assert_eq!(config.openai.model, "gpt-3.5-turbo");
        assert_eq!(config.story.rounds, 2);
        assert!(config.openai.api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_partial() {
        let config = Config::from_toml_str(
            r#"
            mode = "offline"

            [story]
            rounds = 4
            "#,
        )
        .unwrap();
        assert_eq!(config.mode, GeneratorMode::Offline);
        assert_eq!(config.story.rounds, 4);
        assert_eq!(config.openai.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_from_toml_rejects_unknown_mode() {
        assert!(Config::from_toml_str("mode = \"turbo\"").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply_env_overrides(env(&[
            ("OPENAI_API_KEY", "sk-env"),
            ("OPENAI_BASE_URL", "http://localhost:1234"),
            ("USE_MOCK", "Yes"),
        ]));
        assert_eq!(config.openai.api_key.as_deref(), Some("sk-env"));
        assert_eq!(config.openai.base_url, "http://localhost:1234");
        assert_eq!(config.mode, GeneratorMode::Offline);
    }

    #[test]
    fn test_env_blank_values_ignored() {
        let mut config = Config::default();
        config.openai.api_key = Some("sk-file".to_string());
        config.apply_env_overrides(env(&[("OPENAI_API_KEY", "  "), ("USE_MOCK", "false")]));
        assert_eq!(config.openai.api_key.as_deref(), Some("sk-file"));
        assert_eq!(config.mode, GeneratorMode::Live);
    }

    #[test]
    fn test_validate_round_limit() {
        let mut config = Config::default();
        config.story.rounds = MAX_ROUNDS + 1;
        assert!(config.validate().is_err());
        config.story.rounds = 0;
        assert!(config.validate().is_ok());
    }
}
