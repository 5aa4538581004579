use std::sync::Arc;

use regex::Regex;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::{ValueValidator, decode_params};

pub(super) const KIND: &str = "regex";

#[derive(Deserialize)]
struct Params {
    pattern: String,
}

/// Passes values in which the configured pattern is found.
///
/// Matching is a search, not a full-string match; rule authors anchor the
/// pattern with `^...$` when the whole value must match.
#[derive(Debug)]
pub struct RegexValidator {
    pattern: Regex,
}

impl RegexValidator {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }
}

impl ValueValidator for RegexValidator {
    fn kind(&self) -> &'static str {
        KIND
    }

    fn is_valid(&self, value: &str) -> bool {
        self.pattern.is_match(value)
    }
}

pub(super) fn build(params: &Map<String, Value>) -> Result<Arc<dyn ValueValidator>, String> {
    let params: Params = decode_params(params)?;
    let validator = RegexValidator::new(&params.pattern).map_err(|e| e.to_string())?;
    Ok(Arc::new(validator))
}
