// Field-level normalization shared by the plan and judgment validators
//
// Nothing here fails. Wrong shapes collapse to empty/default values and the
// caller decides what the default is.

use serde_json::Value;

/// A fixed set of string values a plan field may take.
pub trait Choice: Copy + PartialEq + Sized + 'static {
    /// Every member, in schema order
    const ALL: &'static [Self];
    /// Substituted for absent or out-of-set values
    const DEFAULT: Self;

    fn as_str(&self) -> &'static str;

    fn from_str_exact(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == s)
    }

    /// `"a" | "b" | "c"` for embedding in a JSON schema sketch
    fn schema_alternatives() -> String {
        Self::ALL
            .iter()
            .map(|c| format!("\"{}\"", c.as_str()))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// A normalized field value plus whether the default was substituted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalized<T> {
    pub value: T,
    pub defaulted: bool,
}

impl<T> Normalized<T> {
    pub fn given(value: T) -> Self {
        Self {
            value,
            defaulted: false,
        }
    }

    pub fn default_to(value: T) -> Self {
        Self {
            value,
            defaulted: true,
        }
    }
}

/// Read an enumerated field. Only an exact string member is accepted.
pub fn normalize_choice<T: Choice>(raw: Option<&Value>) -> Normalized<T> {
    match raw.and_then(Value::as_str).and_then(T::from_str_exact) {
        Some(value) => Normalized::given(value),
        None => Normalized::default_to(T::DEFAULT),
    }
}

/// Render any JSON value as text: strings verbatim, everything else as JSON.
pub fn coerce_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Truncate to at most `max_chars` characters.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => s[..byte_idx].to_string(),
        None => s.to_string(),
    }
}

/// Read a list of text items; a non-array value reads as empty.
pub fn text_list(raw: Option<&Value>) -> Vec<String> {
    match raw {
        Some(Value::Array(items)) => items.iter().map(coerce_text).collect(),
        _ => Vec::new(),
    }
}

/// Keep the first occurrence of each item, preserving order.
pub fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}
