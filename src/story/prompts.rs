// Instruction templates handed to the generation service
//
// The JSON schema sketches in the plan and judge templates are the contract
// the validators in `plan.rs` and `judgment.rs` defend.

use super::judgment::{Judgment, RUBRIC_CATEGORIES};
use super::normalize::Choice;
use super::plan::{AgeBand, StoryLength, StoryPlan, Theme, Tone};

// Each template starts with a fixed opening line. Requests, drafts and
// judge output are only ever embedded after it.
const PLAN_OPENER: &str =
    "You are a helpful assistant that turns a bedtime-story request into a compact story plan.";
const STORY_OPENER: &str = "You are a warm, imaginative storyteller writing a bedtime story";
const JUDGE_OPENER: &str = "You are an expert children's editor judging a bedtime story";
const REVISION_OPENER: &str = "You are revising a bedtime story";

/// Which step a prompt belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Plan,
    Story,
    Judge,
    Revision,
}

impl PromptKind {
    /// Recognize a prompt built by this module from its opening line.
    ///
    /// Anything unrecognized reads as `Story`.
    pub fn detect(prompt: &str) -> Self {
        if prompt.starts_with(PLAN_OPENER) {
            PromptKind::Plan
        } else if prompt.starts_with(JUDGE_OPENER) {
            PromptKind::Judge
        } else if prompt.starts_with(REVISION_OPENER) {
            PromptKind::Revision
        } else {
            PromptKind::Story
        }
    }
}

pub fn build_plan_prompt(user_request: &str) -> String {
    format!(
        "{PLAN_OPENER}\n\
         Audience: children ages 5–10.\n\
         Output MUST be valid JSON only (no markdown), matching this schema:\n\n\
         {{\n  \
           \"age_band\": {age_bands},\n  \
           \"tone\": {tones},\n  \
           \"characters\": [\"...\"],\n  \
           \"setting\": \"...\",\n  \
           \"theme\": {themes},\n  \
           \"length\": {lengths},\n  \
           \"constraints\": [\"...\"]\n\
         }}\n\n\
         Guidance:\n\
         - Choose \"5-7\" if request is very simple; otherwise \"8-10\".\n\
         - Keep bedtime-safe: no gore, no cruelty, no adult topics.\n\
         - Endings should feel calm and reassuring.\n\n\
         USER REQUEST:\n\
         {request}",
        age_bands = AgeBand::schema_alternatives(),
        tones = Tone::schema_alternatives(),
        themes = Theme::schema_alternatives(),
        lengths = StoryLength::schema_alternatives(),
        request = user_request.trim(),
    )
}

pub fn build_story_prompt(plan: &StoryPlan, user_request: &str) -> String {
    let constraints: String = plan
        .constraints()
        .iter()
        .map(|c| format!("\n- {c}"))
        .collect();

    format!(
        "{STORY_OPENER} for children ages {ages}.\n\n\
         Hard requirements:\n\
         - Age-appropriate for ages 5–10 (no violence, gore, or scary imagery).\n\
         - Clear beginning, middle, and end.\n\
         - Gentle tone suitable for bedtime.\n\
         - Keep language simple and vivid; short paragraphs.\n\
         - End with a calming closing line that helps a child feel safe.\n\n\
         Story plan:\n\
         - Tone: {tone}\n\
         - Characters: {characters}\n\
         - Setting: {setting}\n\
         - Theme: {theme}\n\
         - Length: {length}\n\
         - Constraints:{constraints}\n\n\
         Write the full story now. Also include a short title on the first line.\n\
         USER REQUEST (for reference):\n\
         {request}",
        ages = plan.age_band().spoken(),
        tone = plan.tone().as_str(),
        characters = plan.character_list(),
        setting = plan.setting(),
        theme = plan.theme().as_str(),
        length = plan.length().as_str(),
        request = user_request.trim(),
    )
}

pub fn build_judge_prompt(plan: &StoryPlan, draft: &str) -> String {
    let score_lines = RUBRIC_CATEGORIES
        .iter()
        .map(|name| format!("    \"{name}\": 1-10"))
        .collect::<Vec<_>>()
        .join(",\n");

    format!(
        "{JUDGE_OPENER} for ages 5–10.\n\
         You must be strict, specific, and helpful.\n\n\
         Return ONLY valid JSON (no markdown), with this exact schema:\n\
         {{\n  \
           \"scores\": {{\n{score_lines}\n  }},\n  \
           \"overall\": 1-10,\n  \
           \"must_fix\": [\"...\"],\n  \
           \"nice_to_fix\": [\"...\"],\n  \
           \"rewrite_instructions\": [\"...\"]\n\
         }}\n\n\
         Rules:\n\
         - Be aligned to the plan: tone={tone}, theme={theme}, length={length}.\n\
         - \"must_fix\" should list any safety/age issues, confusing parts, or missing arc.\n\
         - \"rewrite_instructions\" must be actionable bullets (5–10 items), referencing what to change.\n\
         - Do NOT rewrite the story here.\n\n\
         STORY:\n\
         {draft}",
        tone = plan.tone().as_str(),
        theme = plan.theme().as_str(),
        length = plan.length().as_str(),
        draft = draft.trim(),
    )
}

pub fn build_revision_prompt(plan: &StoryPlan, draft: &str, judgment: &Judgment) -> String {
    let bullets = judgment
        .rewrite_instructions()
        .iter()
        .map(|b| format!("- {b}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{REVISION_OPENER} for ages 5–10.\n\
         Apply ALL \"must_fix\" and as many \"nice_to_fix\" as possible.\n\
         Keep the same core characters and setting unless instructed otherwise.\n\n\
         Target plan:\n\
         - Tone: {tone}\n\
         - Theme: {theme}\n\
         - Length: {length}\n\
         - Age band: {age_band}\n\n\
         Rewrite instructions:\n\
         {bullets}\n\n\
         Rewrite the FULL story (with title on first line). Ensure a calm bedtime ending.\n\
         STORY TO REVISE:\n\
         {draft}",
        tone = plan.tone().as_str(),
        theme = plan.theme().as_str(),
        length = plan.length().as_str(),
        age_band = plan.age_band().as_str(),
        draft = draft.trim(),
    )
}

/// Fold a follow-up change request into the original request.
pub fn apply_tweak(original_request: &str, tweak: &str) -> String {
    format!("{original_request}\n\nUser requested changes: {tweak}")
}
