// Story plan — the validated creative brief produced by the PLAN step

use serde::Serialize;
use serde_json::{Map, Value};

use super::extract::extract_json_object;
use super::normalize::{
    coerce_text, dedup_preserving_order, normalize_choice, text_list, truncate_chars, Choice,
    Normalized,
};
use crate::errors::StoryError;

pub const MAX_CHARACTERS: usize = 6;
pub const MAX_CHARACTER_CHARS: usize = 60;
pub const MAX_SETTING_CHARS: usize = 120;
pub const MAX_CONSTRAINTS: usize = 8;
pub const MAX_CONSTRAINT_CHARS: usize = 200;
pub const DEFAULT_SETTING: &str = "a cozy place";

/// Constraints every plan carries, whatever the generator proposed
pub const SAFETY_CONSTRAINTS: [&str; 3] = [
    "Keep it bedtime-safe: no gore, no cruelty, no frightening imagery.",
    "No adult topics; keep relationships child-appropriate.",
    "End on a calm, reassuring note.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AgeBand {
    #[serde(rename = "5-7")]
    FiveToSeven,
    #[serde(rename = "8-10")]
    EightToTen,
}

impl Choice for AgeBand {
    const ALL: &'static [Self] = &[AgeBand::FiveToSeven, AgeBand::EightToTen];
    const DEFAULT: Self = AgeBand::EightToTen;

    fn as_str(&self) -> &'static str {
        match self {
            AgeBand::FiveToSeven => "5-7",
            AgeBand::EightToTen => "8-10",
        }
    }
}

impl AgeBand {
    /// "5 to 7" style label for prose prompts
    pub fn spoken(&self) -> String {
        self.as_str().replace('-', " to ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Cozy,
    Silly,
    Adventurous,
    Calm,
}

impl Choice for Tone {
    const ALL: &'static [Self] = &[Tone::Cozy, Tone::Silly, Tone::Adventurous, Tone::Calm];
    const DEFAULT: Self = Tone::Cozy;

    fn as_str(&self) -> &'static str {
        match self {
            Tone::Cozy => "cozy",
            Tone::Silly => "silly",
            Tone::Adventurous => "adventurous",
            Tone::Calm => "calm",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Friendship,
    Bravery,
    Kindness,
    Curiosity,
}

impl Choice for Theme {
    const ALL: &'static [Self] = &[
        Theme::Friendship,
        Theme::Bravery,
        Theme::Kindness,
        Theme::Curiosity,
    ];
    const DEFAULT: Self = Theme::Kindness;

    fn as_str(&self) -> &'static str {
        match self {
            Theme::Friendship => "friendship",
            Theme::Bravery => "bravery",
            Theme::Kindness => "kindness",
            Theme::Curiosity => "curiosity",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoryLength {
    Short,
    Medium,
}

impl Choice for StoryLength {
    const ALL: &'static [Self] = &[StoryLength::Short, StoryLength::Medium];
    const DEFAULT: Self = StoryLength::Medium;

    fn as_str(&self) -> &'static str {
        match self {
            StoryLength::Short => "short",
            StoryLength::Medium => "medium",
        }
    }
}

/// The validated creative brief for one request.
///
/// Only built through [`StoryPlan::from_raw`] / [`parse_story_plan`], which
/// guarantee the enum fields are in-set, free text is capped and the safety
/// constraints are present. Fields are read-only outside this module.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoryPlan {
    age_band: AgeBand,
    tone: Tone,
    characters: Vec<String>,
    setting: String,
    theme: Theme,
    length: StoryLength,
    constraints: Vec<String>,
}

/// A validated plan plus which enumerated fields fell back to defaults
#[derive(Debug, Clone)]
pub struct PlanNormalization {
    pub plan: StoryPlan,
    pub age_band_defaulted: bool,
    pub tone_defaulted: bool,
    pub theme_defaulted: bool,
    pub length_defaulted: bool,
    pub setting_defaulted: bool,
}

impl PlanNormalization {
    /// Names of the fields that were substituted
    pub fn defaulted_fields(&self) -> Vec<&'static str> {
        [
            ("age_band", self.age_band_defaulted),
            ("tone", self.tone_defaulted),
            ("theme", self.theme_defaulted),
            ("length", self.length_defaulted),
            ("setting", self.setting_defaulted),
        ]
        .into_iter()
        .filter_map(|(name, hit)| hit.then_some(name))
        .collect()
    }
}

impl StoryPlan {
    /// Validate a raw plan mapping. Never fails.
    pub fn from_raw(raw: &Map<String, Value>) -> Self {
        Self::normalize_raw(raw).plan
    }

    /// Validate a raw plan mapping, reporting which fields were defaulted.
    pub fn normalize_raw(raw: &Map<String, Value>) -> PlanNormalization {
        let age_band: Normalized<AgeBand> = normalize_choice(raw.get("age_band"));
        let tone: Normalized<Tone> = normalize_choice(raw.get("tone"));
        let theme: Normalized<Theme> = normalize_choice(raw.get("theme"));
        let length: Normalized<StoryLength> = normalize_choice(raw.get("length"));

        let characters = text_list(raw.get("characters"))
            .iter()
            .map(|c| truncate_chars(c, MAX_CHARACTER_CHARS))
            .take(MAX_CHARACTERS)
            .collect();

        let setting = match raw.get("setting") {
            Some(value) => Normalized::given(truncate_chars(&coerce_text(value), MAX_SETTING_CHARS)),
            None => Normalized::default_to(DEFAULT_SETTING.to_string()),
        };

        let constraints = merge_constraints(text_list(raw.get("constraints")));

        PlanNormalization {
            plan: StoryPlan {
                age_band: age_band.value,
                tone: tone.value,
                characters,
                setting: setting.value,
                theme: theme.value,
                length: length.value,
                constraints,
            },
            age_band_defaulted: age_band.defaulted,
            tone_defaulted: tone.defaulted,
            theme_defaulted: theme.defaulted,
            length_defaulted: length.defaulted,
            setting_defaulted: setting.defaulted,
        }
    }

    pub fn age_band(&self) -> AgeBand {
        self.age_band
    }

    pub fn tone(&self) -> Tone {
        self.tone
    }

    pub fn characters(&self) -> &[String] {
        &self.characters
    }

    pub fn setting(&self) -> &str {
        &self.setting
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn length(&self) -> StoryLength {
        self.length
    }

    /// Generator constraints followed by the safety constraints
    pub fn constraints(&self) -> &[String] {
        &self.constraints
    }

    /// Characters joined for prose, or a stand-in when none were named
    pub fn character_list(&self) -> String {
        if self.characters.is_empty() {
            "a kind main character".to_string()
        } else {
            self.characters.join(", ")
        }
    }
}

/// Append the safety constraints, dedupe, and cap without evicting them.
fn merge_constraints(generated: Vec<String>) -> Vec<String> {
    let merged: Vec<String> = generated
        .iter()
        .map(|c| truncate_chars(c, MAX_CONSTRAINT_CHARS))
        .chain(SAFETY_CONSTRAINTS.iter().map(|s| s.to_string()))
        .collect();

    let mut room = MAX_CONSTRAINTS - SAFETY_CONSTRAINTS.len();
    dedup_preserving_order(merged)
        .into_iter()
        .filter(|c| {
            if SAFETY_CONSTRAINTS.contains(&c.as_str()) {
                return true;
            }
            if room == 0 {
                return false;
            }
            room -= 1;
            true
        })
        .collect()
}

/// Extract and validate a plan from generator text.
pub fn parse_story_plan(text: &str) -> Result<StoryPlan, StoryError> {
    let raw = extract_json_object(text)?;
    let normalized = StoryPlan::normalize_raw(&raw);
    let defaulted = normalized.defaulted_fields();
    if !defaulted.is_empty() {
        tracing::debug!("Plan fields defaulted: {}", defaulted.join(", "));
    }
    Ok(normalized.plan)
}
