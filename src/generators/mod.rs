// Generation service boundary
//
// The story loop only ever sees `Arc<dyn Generator>`. Live and offline
// implementations are interchangeable; the choice is made once, in
// `create_generator`, from configuration.

use async_trait::async_trait;

use crate::errors::StoryError;

pub mod factory;
pub mod offline;
pub mod openai;
mod retry;

pub use factory::create_generator;
pub use offline::OfflineGenerator;
pub use openai::OpenAiGenerator;

/// Sampling parameters for one generation call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub max_output_tokens: u32,
    pub temperature: f32,
}

impl GenerationParams {
    pub const fn new(max_output_tokens: u32, temperature: f32) -> Self {
        Self {
            max_output_tokens,
            temperature,
        }
    }
}

/// Opaque text-generation service: prompt in, text out
#[async_trait]
pub trait Generator: Send + Sync {
    /// Send one prompt and return the generated text
    async fn invoke(&self, prompt: &str, params: GenerationParams) -> Result<String, StoryError>;

    /// Generator name for logging
    fn name(&self) -> &str;
}
