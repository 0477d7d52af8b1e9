// Response extraction — pull one JSON object out of noisy model output

use serde_json::{Map, Value};

use crate::errors::StoryError;

/// Extract a single JSON object from a generator response.
///
/// The model is asked for bare JSON but sometimes adds prose or code fences
/// around it. The whole trimmed text is tried first; failing that, the slice
/// from the first `{` to the last `}` is parsed. The slice is greedy, not a
/// balanced-brace scan, so two separate objects in one response will not
/// parse and surface as `MalformedResponse`.
pub fn extract_json_object(text: &str) -> Result<Map<String, Value>, StoryError> {
    let trimmed = text.trim();

    // Try direct parse
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(trimmed) {
        return Ok(map);
    }

    // Try the outermost brace span
    let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) else {
        return Err(StoryError::malformed(
            "no JSON object found in response",
            text,
        ));
    };
    if end < start {
        return Err(StoryError::malformed(
            "no JSON object found in response",
            text,
        ));
    }

    match serde_json::from_str::<Value>(&trimmed[start..=end]) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(StoryError::malformed("response is not a JSON object", text)),
        Err(e) => {
            tracing::debug!("Brace-span parse failed: {}", e);
            Err(StoryError::malformed(format!("invalid JSON: {e}"), text))
        }
    }
}
