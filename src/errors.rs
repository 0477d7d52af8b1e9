// Error types for the story pipeline
//
// Structural failures (unparseable model output, unreachable service) are
// errors. Content-shape anomalies inside a parsed record never are: the
// validators in `story::plan` and `story::judgment` absorb them.

use thiserror::Error;

/// Errors surfaced by the story pipeline and the generation boundary
#[derive(Error, Debug)]
pub enum StoryError {
    /// Generator output could not be turned into a structured record
    #[error("Malformed response from generation service: {reason}")]
    MalformedResponse {
        /// Why extraction failed (last parse error or missing braces)
        reason: String,
        /// The offending generator text, verbatim
        raw: String,
    },

    /// The generation service is not configured or could not be reached
    #[error("Generation service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl StoryError {
    pub fn malformed(reason: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
            raw: raw.into(),
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::ServiceUnavailable(reason.into())
    }

    /// Raw generator text attached to a `MalformedResponse`, if any
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Self::MalformedResponse { raw, .. } => Some(raw),
            Self::ServiceUnavailable(_) => None,
        }
    }
}

/// Plain-text reason used when live mode has no credential
pub fn missing_api_key_hint() -> String {
    "OPENAI_API_KEY is not set. Set it in your environment, add `api_key` \
     under [openai] in ~/.lullaby/config.toml, or run `lullaby --offline`."
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_carries_raw_text() {
        let err = StoryError::malformed("no braces", "just prose");
        assert_eq!(err.raw_response(), Some("just prose"));
        assert!(err.to_string().contains("no braces"));
    }

    #[test]
    fn test_missing_key_hint_is_plain_text() {
        let hint = missing_api_key_hint();
        assert!(hint.contains("OPENAI_API_KEY"));
        assert!(hint.contains("lullaby --offline"));
        assert!(!hint.chars().any(|c| c.is_control()));
    }

    #[test]
    fn test_unavailable_has_no_raw_text() {
        let err = StoryError::unavailable("missing key");
        assert!(err.raw_response().is_none());
        assert_eq!(
            err.to_string(),
            "Generation service unavailable: missing key"
        );
    }
}
