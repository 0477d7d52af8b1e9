// Configuration loader
// Loads settings from ~/.lullaby/config.toml, then environment variables

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::constants::{CONFIG_DIR, CONFIG_FILE};
use super::settings::Config;

/// Default config file path, if a home directory can be determined
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Load configuration from the process environment.
///
/// An explicit `path` must exist. Without one, the default file is used when
/// present and silently skipped otherwise.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    load_config_with_env(path, |key| std::env::var(key).ok())
}

/// Same as [`load_config`] with an injectable environment lookup.
pub fn load_config_with_env<F>(path: Option<&Path>, lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => read_config_file(path)?,
        None => match default_config_path().filter(|p| p.exists()) {
            Some(path) => read_config_file(&path)?,
            None => Config::default(),
        },
    };

    config.apply_env_overrides(lookup);
    config
        .validate()
        .context("Configuration validation failed")?;

    tracing::debug!(
        "Loaded config: mode={:?} model={} rounds={}",
        config.mode,
        config.openai.model,
        config.story.rounds
    );

    Ok(config)
}

fn read_config_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    Config::from_toml_str(&contents)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}
