// Generator factory
//
// Creates the generation service implementation selected by configuration

use std::sync::Arc;

use super::{Generator, OfflineGenerator, OpenAiGenerator};
use crate::config::{Config, GeneratorMode};
use crate::errors::StoryError;

/// Create the configured generator.
///
/// Live mode without an API key fails here with `ServiceUnavailable`, before
/// any prompt is built or sent.
pub fn create_generator(config: &Config) -> Result<Arc<dyn Generator>, StoryError> {
    match config.mode {
        GeneratorMode::Offline => {
            tracing::info!("Using offline generator; no API calls will be made");
            Ok(Arc::new(OfflineGenerator::new()))
        }
        GeneratorMode::Live => {
            let generator = OpenAiGenerator::from_settings(&config.openai)?;
            tracing::info!(
                "Using live generator {} (model {})",
                config.openai.base_url,
                generator.model()
            );
            Ok(Arc::new(generator))
        }
    }
}
