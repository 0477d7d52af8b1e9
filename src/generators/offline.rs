// Deterministic offline generator
//
// Answers every prompt kind with canned text so the full loop runs without
// network access or credentials.

use async_trait::async_trait;
use serde_json::json;

use super::{GenerationParams, Generator};
use crate::errors::StoryError;
use crate::story::PromptKind;

pub const OFFLINE_FIRST_DRAFT: &str =
    "A Cozy Little Story\n\nOnce upon a time...\n\nThe end.";

pub const OFFLINE_REVISED_DRAFT: &str = "Moonlight Tea and the Purring Promise\n\n\
     Alice and Bob the cat listened to the soft *whoosh* of the night breeze...\n\n\
     The end. Sweet dreams.";

/// Offline stand-in for the generation service
#[derive(Debug, Clone, Default)]
pub struct OfflineGenerator;

impl OfflineGenerator {
    pub fn new() -> Self {
        Self
    }

    fn plan_response() -> String {
        json!({
            "age_band": "5-7",
            "tone": "cozy",
            "characters": ["Alice", "Bob the cat"],
            "setting": "a little cottage near a moonlit garden",
            "theme": "friendship",
            "length": "short",
            "constraints": ["No scary scenes", "Gentle bedtime tone"]
        })
        .to_string()
    }

    fn judge_response() -> String {
        json!({
            "scores": {
                "age_appropriateness": 9,
                "coherence": 8,
                "creativity": 8,
                "warmth": 9,
                "bedtime_ending": 9,
                "language_clarity": 8
            },
            "overall": 9,
            "must_fix": [],
            "nice_to_fix": ["Add one sensory detail", "Give the cat a funny gentle habit"],
            "rewrite_instructions": [
                "Add one cozy sensory detail (sound/smell).",
                "Add a gentle funny habit for Bob the cat.",
                "Keep the ending calm and reassuring."
            ]
        })
        .to_string()
    }
}

#[async_trait]
impl Generator for OfflineGenerator {
    async fn invoke(&self, prompt: &str, params: GenerationParams) -> Result<String, StoryError> {
        let kind = PromptKind::detect(prompt);
        tracing::debug!(
            "Offline generator answering {:?} prompt (max_tokens={})",
            kind,
            params.max_output_tokens
        );

        Ok(match kind {
            PromptKind::Plan => Self::plan_response(),
            PromptKind::Judge => Self::judge_response(),
            PromptKind::Revision => OFFLINE_REVISED_DRAFT.to_string(),
            PromptKind::Story => OFFLINE_FIRST_DRAFT.to_string(),
        })
    }

    fn name(&self) -> &str {
        "offline"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::story::{
        build_plan_prompt, build_story_prompt, parse_judgment, parse_story_plan, Theme,
    };

    const PARAMS: GenerationParams = GenerationParams::new(100, 0.0);

    #[tokio::test]
    async fn test_plan_response_validates() {
        let text = OfflineGenerator::new()
            .invoke(&build_plan_prompt("a cat story"), PARAMS)
            .await
            .unwrap();
        let plan = parse_story_plan(&text).unwrap();
        assert_eq!(plan.theme(), Theme::Friendship);
        assert_eq!(plan.constraints().len(), 5);
    }

    #[test]
    fn test_judge_response_validates() {
        let judgment = parse_judgment(&OfflineGenerator::judge_response()).unwrap();
        assert_eq!(judgment.overall(), 9);
        assert_eq!(judgment.rewrite_instructions().len(), 3);
    }

    #[tokio::test]
    async fn test_request_quoting_revision_wording_gets_first_draft() {
        let plan = parse_story_plan(&OfflineGenerator::plan_response()).unwrap();
        let prompt = build_story_prompt(&plan, "Rewrite the FULL story about my cat, please");
        let text = OfflineGenerator::new().invoke(&prompt, PARAMS).await.unwrap();
        assert_eq!(text, OFFLINE_FIRST_DRAFT);
    }

    #[tokio::test]
    async fn test_unrecognized_prompt_gets_first_draft() {
        let text = OfflineGenerator::new()
            .invoke("tell me anything", PARAMS)
            .await
            .unwrap();
        assert_eq!(text, OFFLINE_FIRST_DRAFT);
    }
}
