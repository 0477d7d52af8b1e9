// Loop types — Draft, StoryOutcome, LoopConfig

use crate::config::constants::*;
use crate::config::Config;
use crate::generators::GenerationParams;

use super::judgment::Judgment;
use super::plan::StoryPlan;

/// Story text passed between generation calls. Never validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft(String);

impl Draft {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// First non-blank line, which the prompts ask to be the title
    pub fn title(&self) -> Option<&str> {
        self.0.lines().map(str::trim).find(|l| !l.is_empty())
    }

    /// Everything after the title line
    pub fn body(&self) -> &str {
        let text = self.0.trim_start();
        match text.split_once('\n') {
            Some((_, rest)) => rest.trim(),
            None => "",
        }
    }
}

/// Everything one run of the loop produced
#[derive(Debug, Clone)]
pub struct StoryOutcome {
    /// Final draft, surrounding whitespace trimmed
    pub story: String,
    pub plan: StoryPlan,
    /// One entry per round, in order
    pub judgments: Vec<Judgment>,
}

impl StoryOutcome {
    pub fn last_judgment(&self) -> Option<&Judgment> {
        self.judgments.last()
    }

    pub fn draft(&self) -> Draft {
        Draft::new(self.story.clone())
    }
}

/// Configuration for the judge/revise loop
#[derive(Debug, Clone, PartialEq)]
pub struct LoopConfig {
    /// Judge + revise rounds; all of them always run
    pub rounds: usize,
    pub plan_params: GenerationParams,
    pub story_params: GenerationParams,
    pub judge_params: GenerationParams,
    pub revision_params: GenerationParams,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_ROUNDS,
            plan_params: GenerationParams::new(PLAN_MAX_TOKENS, PLAN_TEMPERATURE),
            story_params: GenerationParams::new(STORY_MAX_TOKENS, STORY_TEMPERATURE),
            judge_params: GenerationParams::new(JUDGE_MAX_TOKENS, JUDGE_TEMPERATURE),
            revision_params: GenerationParams::new(STORY_MAX_TOKENS, STORY_TEMPERATURE),
        }
    }
}

impl LoopConfig {
    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }
}

impl From<&Config> for LoopConfig {
    fn from(config: &Config) -> Self {
        LoopConfig::default().with_rounds(config.story.rounds)
    }
}
