// Project-wide constants
//
// Centralised here so token budgets and defaults have one source of truth.

/// Default chat model for the live generator.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Default OpenAI-compatible API root.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

pub const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Attempts per generation call in the live client (1 = no retry).
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Judge + revise rounds per request.
pub const DEFAULT_ROUNDS: usize = 2;

/// Upper bound accepted from configuration.
pub const MAX_ROUNDS: usize = 10;

pub const PLAN_MAX_TOKENS: u32 = 450;
pub const PLAN_TEMPERATURE: f32 = 0.2;

pub const STORY_MAX_TOKENS: u32 = 900;
pub const STORY_TEMPERATURE: f32 = 0.7;

pub const JUDGE_MAX_TOKENS: u32 = 500;
pub const JUDGE_TEMPERATURE: f32 = 0.0;

/// Config file location under the home directory.
pub const CONFIG_DIR: &str = ".lullaby";
pub const CONFIG_FILE: &str = "config.toml";

/// Environment variables read by the loader.
pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_BASE_URL: &str = "OPENAI_BASE_URL";
pub const ENV_OFFLINE: &str = "USE_MOCK";
