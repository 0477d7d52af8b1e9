// Story loop runner — plan, draft, then judge and revise for a fixed number of rounds

use std::sync::Arc;

use crate::errors::StoryError;
use crate::generators::{GenerationParams, Generator};

use super::judgment::{parse_judgment, Judgment};
use super::normalize::Choice;
use super::plan::{parse_story_plan, StoryPlan};
use super::prompts::{
    apply_tweak, build_judge_prompt, build_plan_prompt, build_revision_prompt, build_story_prompt,
};
use super::types::{Draft, LoopConfig, StoryOutcome};

/// The judge/revise story loop.
///
/// `PLAN → DRAFT → (JUDGE → REVISE) × rounds`. Every round runs, whatever the
/// scores say; there is no convergence check. Each generator call is awaited
/// before the next is built, since each step consumes the previous output.
pub struct StoryLoop {
    generator: Arc<dyn Generator>,
    config: LoopConfig,
}

impl StoryLoop {
    pub fn new(generator: Arc<dyn Generator>, config: LoopConfig) -> Self {
        Self { generator, config }
    }

    pub fn config(&self) -> &LoopConfig {
        &self.config
    }

    /// Run the full loop for one request.
    pub async fn run(&self, request: &str) -> Result<StoryOutcome, StoryError> {
        tracing::info!(
            "Starting story loop ({} rounds, generator: {})",
            self.config.rounds,
            self.generator.name()
        );

        // ── 1. Plan ─────────────────────────────────────────────────────────
        let plan = self.plan(request).await?;
        tracing::info!(
            "Plan: age_band={} tone={} theme={} length={} characters={}",
            plan.age_band().as_str(),
            plan.tone().as_str(),
            plan.theme().as_str(),
            plan.length().as_str(),
            plan.characters().len()
        );

        // ── 2. First draft ──────────────────────────────────────────────────
        let mut draft = self
            .call(&build_story_prompt(&plan, request), self.config.story_params)
            .await
            .map(Draft::new)?;

        // ── 3. Judge → revise rounds ────────────────────────────────────────
        let mut judgments: Vec<Judgment> = Vec::with_capacity(self.config.rounds);
        for round in 1..=self.config.rounds {
            let judgment = self.judge(&plan, &draft).await?;
            tracing::info!(
                "Round {}/{} judgment: {}",
                round,
                self.config.rounds,
                judgment.summary_line()
            );
            if !judgment.must_fix().is_empty() {
                tracing::debug!("Must fix: {}", judgment.must_fix().join("; "));
            }

            draft = self.revise(&plan, &draft, &judgment).await?;
            judgments.push(judgment);
        }

        Ok(StoryOutcome {
            story: draft.into_string().trim().to_string(),
            plan,
            judgments,
        })
    }

    /// Re-run the whole loop on the request with a change folded in.
    ///
    /// Nothing from any earlier run is reused.
    pub async fn run_with_tweak(
        &self,
        request: &str,
        tweak: &str,
    ) -> Result<StoryOutcome, StoryError> {
        self.run(&apply_tweak(request, tweak)).await
    }

    // ── Private helpers ────────────────────────────────────────────────────────

    async fn plan(&self, request: &str) -> Result<StoryPlan, StoryError> {
        let text = self
            .call(&build_plan_prompt(request), self.config.plan_params)
            .await?;
        parse_story_plan(&text).inspect_err(|e| {
            tracing::warn!("Plan response could not be parsed: {}", e);
        })
    }

    async fn judge(&self, plan: &StoryPlan, draft: &Draft) -> Result<Judgment, StoryError> {
        let text = self
            .call(&build_judge_prompt(plan, draft.as_str()), self.config.judge_params)
            .await?;
        parse_judgment(&text).inspect_err(|e| {
            tracing::warn!("Judge response could not be parsed: {}", e);
        })
    }

    async fn revise(
        &self,
        plan: &StoryPlan,
        draft: &Draft,
        judgment: &Judgment,
    ) -> Result<Draft, StoryError> {
        let prompt = build_revision_prompt(plan, draft.as_str(), judgment);
        self.call(&prompt, self.config.revision_params)
            .await
            .map(Draft::new)
    }

    async fn call(&self, prompt: &str, params: GenerationParams) -> Result<String, StoryError> {
        tracing::debug!(
            "Generator call: {} prompt chars, max_tokens={}, temperature={}",
            prompt.len(),
            params.max_output_tokens,
            params.temperature
        );
        self.generator.invoke(prompt, params).await
    }
}
