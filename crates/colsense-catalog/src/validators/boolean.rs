use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Map, Value};

use super::{ValueValidator, decode_params};

pub(super) const KIND: &str = "boolean_like";

/// Tokens accepted when a rule does not set `accepted`.
pub const DEFAULT_BOOLEAN_TOKENS: &[&str] = &[
    "true", "false", "1", "0", "yes", "no", "y", "n", "active", "inactive",
];

#[derive(Deserialize)]
struct Params {
    #[serde(default)]
    accepted: Option<Vec<String>>,
}

/// Passes values whose trimmed, lowercased form is an accepted token.
#[derive(Debug)]
pub struct BooleanLikeValidator {
    accepted: BTreeSet<String>,
}

impl BooleanLikeValidator {
    pub fn new<I, S>(accepted: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let accepted: BTreeSet<String> = accepted
            .into_iter()
            .map(|token| token.as_ref().trim().to_lowercase())
            .filter(|token| !token.is_empty())
            .collect();
        if accepted.is_empty() {
            return Err("accepted must list at least one token".to_string());
        }
        Ok(Self { accepted })
    }
}

impl Default for BooleanLikeValidator {
    fn default() -> Self {
        Self {
            accepted: DEFAULT_BOOLEAN_TOKENS
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl ValueValidator for BooleanLikeValidator {
    fn kind(&self) -> &'static str {
        KIND
    }

    fn is_valid(&self, value: &str) -> bool {
        self.accepted.contains(&value.trim().to_lowercase())
    }
}

pub(super) fn build(params: &Map<String, Value>) -> Result<Arc<dyn ValueValidator>, String> {
    let params: Params = decode_params(params)?;
    let validator = match params.accepted {
        Some(tokens) => BooleanLikeValidator::new(tokens)?,
        None => BooleanLikeValidator::default(),
    };
    Ok(Arc::new(validator))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tokens_are_case_insensitive() {
        let validator = BooleanLikeValidator::default();
        for token in ["TRUE", "False", " yes ", "N", "1", "Inactive"] {
            assert!(validator.is_valid(token), "{token}");
        }
        assert!(!validator.is_valid("maybe"));
        assert!(!validator.is_valid("2"));
    }

    #[test]
    fn configured_tokens_replace_defaults() {
        let validator = BooleanLikeValidator::new(["A", "I"]).expect("tokens");
        assert!(validator.is_valid("a"));
        assert!(validator.is_valid("I"));
        assert!(!validator.is_valid("true"));
    }
}
