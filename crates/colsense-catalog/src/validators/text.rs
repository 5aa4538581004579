use std::sync::Arc;

use regex::Regex;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::{ValueValidator, decode_params};

pub(super) const KIND: &str = "text_format";

/// Character class used when a rule does not set `allowed_chars`:
/// letters, whitespace, hyphens, apostrophes and periods.
pub const DEFAULT_ALLOWED_CHARS: &str = r"\p{L}\s\-'.";

#[derive(Deserialize)]
struct Params {
    #[serde(default)]
    min_length: Option<usize>,
    #[serde(default)]
    max_length: Option<usize>,
    /// Regex character-class body; an empty string allows any character.
    #[serde(default)]
    allowed_chars: Option<String>,
}

/// Passes non-empty text within a length range, optionally restricted to a
/// character class.
#[derive(Debug)]
pub struct TextFormatValidator {
    min_length: usize,
    max_length: Option<usize>,
    allowed: Option<Regex>,
}

impl TextFormatValidator {
    pub fn new(
        min_length: usize,
        max_length: Option<usize>,
        allowed_chars: Option<&str>,
    ) -> Result<Self, String> {
        let min_length = min_length.max(1);
        if let Some(max) = max_length
            && max < min_length
        {
            return Err(format!(
                "max_length ({max}) is smaller than min_length ({min_length})"
            ));
        }
        let allowed = match allowed_chars {
            Some("") | None => None,
            Some(class) => Some(
                Regex::new(&format!("^[{class}]+$"))
                    .map_err(|e| format!("invalid allowed_chars: {e}"))?,
            ),
        };
        Ok(Self {
            min_length,
            max_length,
            allowed,
        })
    }
}

impl ValueValidator for TextFormatValidator {
    fn kind(&self) -> &'static str {
        KIND
    }

    fn is_valid(&self, value: &str) -> bool {
        let value = value.trim();
        let length = value.chars().count();
        if length < self.min_length || self.max_length.is_some_and(|max| length > max) {
            return false;
        }
        self.allowed
            .as_ref()
            .is_none_or(|allowed| allowed.is_match(value))
    }
}

pub(super) fn build(params: &Map<String, Value>) -> Result<Arc<dyn ValueValidator>, String> {
    let params: Params = decode_params(params)?;
    let allowed_chars = params
        .allowed_chars
        .as_deref()
        .unwrap_or(DEFAULT_ALLOWED_CHARS);
    let validator = TextFormatValidator::new(
        params.min_length.unwrap_or(1),
        params.max_length,
        Some(allowed_chars),
    )?;
    Ok(Arc::new(validator))
}
