use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Map, Value};

use super::{ValueValidator, decode_params};

pub(super) const NUMERIC_KIND: &str = "numeric";
pub(super) const RANGE_KIND: &str = "numeric_range";

/// Parses an integer or a finite floating-point number, ignoring
/// surrounding whitespace.
pub fn parse_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if let Ok(int) = trimmed.parse::<i64>() {
        return Some(int as f64);
    }
    trimmed.parse::<f64>().ok().filter(|num| num.is_finite())
}

/// Passes values that parse as numbers.
#[derive(Debug, Default)]
pub struct NumericValidator;

impl ValueValidator for NumericValidator {
    fn kind(&self) -> &'static str {
        NUMERIC_KIND
    }

    fn is_valid(&self, value: &str) -> bool {
        parse_number(value).is_some()
    }
}

/// Passes numbers within `[min, max]`; a missing bound is unbounded.
#[derive(Debug, Default, Deserialize)]
pub struct NumericRangeValidator {
    #[serde(default)]
    min: Option<f64>,
    #[serde(default)]
    max: Option<f64>,
}

impl NumericRangeValidator {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Result<Self, String> {
        if let (Some(min), Some(max)) = (min, max)
            && min > max
        {
            return Err(format!("min ({min}) is greater than max ({max})"));
        }
        Ok(Self { min, max })
    }
}

impl ValueValidator for NumericRangeValidator {
    fn kind(&self) -> &'static str {
        RANGE_KIND
    }

    fn is_valid(&self, value: &str) -> bool {
        let Some(num) = parse_number(value) else {
            return false;
        };
        self.min.is_none_or(|min| num >= min) && self.max.is_none_or(|max| num <= max)
    }
}

pub(super) fn build_numeric(
    _params: &Map<String, Value>,
) -> Result<Arc<dyn ValueValidator>, String> {
    Ok(Arc::new(NumericValidator))
}

pub(super) fn build_range(params: &Map<String, Value>) -> Result<Arc<dyn ValueValidator>, String> {
    let parsed: NumericRangeValidator = decode_params(params)?;
    Ok(Arc::new(NumericRangeValidator::new(parsed.min, parsed.max)?))
}
