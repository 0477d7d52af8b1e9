// Judgment — one round's rubric critique of a draft

use serde::Serialize;
use serde_json::{Map, Value};

use super::extract::extract_json_object;
use super::normalize::text_list;
use crate::errors::StoryError;

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 10;
/// Used for missing or non-numeric scores, before clamping
pub const FALLBACK_SCORE: i64 = 7;
pub const MAX_ISSUES: usize = 10;
pub const MAX_REWRITE_INSTRUCTIONS: usize = 12;
pub const MIN_REWRITE_INSTRUCTIONS: usize = 3;

/// Prepended when the judge supplied fewer than three instructions
pub const BASELINE_REWRITE_INSTRUCTIONS: [&str; 3] = [
    "Ensure the story has a clear beginning, middle, and end.",
    "Use short paragraphs and simple sentences for ages 5–10.",
    "End with a calm, reassuring bedtime closing line.",
];

/// Rubric category names, in schema order
pub const RUBRIC_CATEGORIES: [&str; 6] = [
    "age_appropriateness",
    "coherence",
    "creativity",
    "warmth",
    "bedtime_ending",
    "language_clarity",
];

/// Per-category rubric scores, each in [1, 10]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RubricScores {
    age_appropriateness: u8,
    coherence: u8,
    creativity: u8,
    warmth: u8,
    bedtime_ending: u8,
    language_clarity: u8,
}

impl RubricScores {
    fn from_raw(scores: &Map<String, Value>) -> Self {
        let score = |name: &str| coerce_score(scores.get(name));
        Self {
            age_appropriateness: score("age_appropriateness"),
            coherence: score("coherence"),
            creativity: score("creativity"),
            warmth: score("warmth"),
            bedtime_ending: score("bedtime_ending"),
            language_clarity: score("language_clarity"),
        }
    }

    /// Score for a rubric category, `None` for an unknown name
    pub fn get(&self, category: &str) -> Option<u8> {
        self.entries()
            .into_iter()
            .find(|(name, _)| *name == category)
            .map(|(_, score)| score)
    }

    /// `(category, score)` pairs in schema order
    pub fn entries(&self) -> [(&'static str, u8); 6] {
        [
            (RUBRIC_CATEGORIES[0], self.age_appropriateness),
            (RUBRIC_CATEGORIES[1], self.coherence),
            (RUBRIC_CATEGORIES[2], self.creativity),
            (RUBRIC_CATEGORIES[3], self.warmth),
            (RUBRIC_CATEGORIES[4], self.bedtime_ending),
            (RUBRIC_CATEGORIES[5], self.language_clarity),
        ]
    }

    /// Mean of the six scores, rounded half to even
    pub fn rounded_mean(&self) -> u8 {
        let total: u32 = self.entries().iter().map(|(_, s)| *s as u32).sum();
        let mean = total as f64 / RUBRIC_CATEGORIES.len() as f64;
        mean.round_ties_even() as u8
    }
}

/// A validated critique of one draft
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Judgment {
    scores: RubricScores,
    overall: u8,
    must_fix: Vec<String>,
    nice_to_fix: Vec<String>,
    rewrite_instructions: Vec<String>,
    #[serde(skip)]
    raw: String,
}

impl Judgment {
    /// Validate a raw judgment mapping. Never fails.
    pub fn from_raw(obj: &Map<String, Value>, raw: impl Into<String>) -> Self {
        let empty = Map::new();
        let scores = match obj.get("scores") {
            Some(Value::Object(map)) => map,
            _ => &empty,
        };
        let scores = RubricScores::from_raw(scores);

        let overall = match obj.get("overall") {
            Some(value) => coerce_score(Some(value)),
            None => scores.rounded_mean(),
        };

        let must_fix = capped(text_list(obj.get("must_fix")), MAX_ISSUES);
        let nice_to_fix = capped(text_list(obj.get("nice_to_fix")), MAX_ISSUES);

        let mut rewrite_instructions = capped(
            text_list(obj.get("rewrite_instructions")),
            MAX_REWRITE_INSTRUCTIONS,
        );
        if rewrite_instructions.len() < MIN_REWRITE_INSTRUCTIONS {
            rewrite_instructions = BASELINE_REWRITE_INSTRUCTIONS
                .iter()
                .map(|s| s.to_string())
                .chain(rewrite_instructions)
                .collect();
        }
        rewrite_instructions.truncate(MAX_REWRITE_INSTRUCTIONS);

        Self {
            scores,
            overall,
            must_fix,
            nice_to_fix,
            rewrite_instructions,
            raw: raw.into(),
        }
    }

    pub fn scores(&self) -> &RubricScores {
        &self.scores
    }

    pub fn overall(&self) -> u8 {
        self.overall
    }

    pub fn must_fix(&self) -> &[String] {
        &self.must_fix
    }

    pub fn nice_to_fix(&self) -> &[String] {
        &self.nice_to_fix
    }

    /// Between 3 and 12 items
    pub fn rewrite_instructions(&self) -> &[String] {
        &self.rewrite_instructions
    }

    /// Generator text this judgment was parsed from
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// `age_appropriateness:9 | coherence:8 | ... | overall:9`
    pub fn summary_line(&self) -> String {
        let mut parts: Vec<String> = self
            .scores
            .entries()
            .iter()
            .map(|(name, score)| format!("{name}:{score}"))
            .collect();
        parts.push(format!("overall:{}", self.overall));
        parts.join(" | ")
    }
}

fn capped(mut items: Vec<String>, max: usize) -> Vec<String> {
    items.truncate(max);
    items
}

/// Coerce a raw score to an integer in [1, 10].
///
/// Integers pass through, floats truncate toward zero, numeric strings are
/// parsed. Anything else (missing, null, bool, non-numeric) becomes 7.
pub fn coerce_score(value: Option<&Value>) -> u8 {
    let n = match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(FALLBACK_SCORE),
        Some(Value::String(s)) => parse_numeric(s.trim()).unwrap_or(FALLBACK_SCORE),
        _ => FALLBACK_SCORE,
    };
    n.clamp(MIN_SCORE as i64, MAX_SCORE as i64) as u8
}

fn parse_numeric(s: &str) -> Option<i64> {
    if let Ok(n) = s.parse::<i64>() {
        return Some(n);
    }
    s.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(|f| f.trunc() as i64)
}

/// Extract and validate a judgment from generator text.
pub fn parse_judgment(text: &str) -> Result<Judgment, StoryError> {
    let obj = extract_json_object(text)?;
    Ok(Judgment::from_raw(&obj, text))
}
