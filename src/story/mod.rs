// Story pipeline — plan, draft, judge, revise
//
// Model output crosses into typed values only through `extract` and the two
// validators (`plan`, `judgment`). Everything downstream works on
// `StoryPlan` and `Judgment`, never on raw JSON maps.

pub mod extract;
pub mod judgment;
pub mod normalize;
pub mod plan;
pub mod prompts;
pub mod revision;
pub mod types;

pub use extract::extract_json_object;
pub use judgment::{
    coerce_score, parse_judgment, Judgment, RubricScores, BASELINE_REWRITE_INSTRUCTIONS,
    RUBRIC_CATEGORIES,
};
pub use normalize::{normalize_choice, Choice, Normalized};
pub use plan::{
    parse_story_plan, AgeBand, PlanNormalization, StoryLength, StoryPlan, Theme, Tone,
    SAFETY_CONSTRAINTS,
};
pub use prompts::{
    apply_tweak, build_judge_prompt, build_plan_prompt, build_revision_prompt, build_story_prompt,
    PromptKind,
};
pub use revision::StoryLoop;
pub use types::{Draft, LoopConfig, StoryOutcome};
