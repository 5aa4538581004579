use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;
use serde_json::{Map, Value};

use super::{ValueValidator, decode_params};

pub(super) const KIND: &str = "date_format";

/// Format token accepted in `formats` for RFC 3339 timestamps.
pub const RFC3339_TOKEN: &str = "rfc3339";

/// Formats tried, in order, when a rule does not list its own.
pub const DEFAULT_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%H:%M:%S",
    RFC3339_TOKEN,
];

#[derive(Deserialize)]
struct Params {
    #[serde(default)]
    formats: Option<Vec<String>>,
}

/// Passes values that parse against one of an ordered list of formats.
#[derive(Debug)]
pub struct DateFormatValidator {
    formats: Vec<String>,
}

impl DateFormatValidator {
    pub fn new<I, S>(formats: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let formats: Vec<String> = formats.into_iter().map(Into::into).collect();
        if formats.is_empty() {
            return Err("formats must list at least one format".to_string());
        }
        Ok(Self { formats })
    }

    /// The first format the value parses with.
    pub fn matching_format(&self, value: &str) -> Option<&str> {
        let trimmed = value.trim();
        self.formats
            .iter()
            .find(|format| parses_with(trimmed, format))
            .map(String::as_str)
    }
}

impl Default for DateFormatValidator {
    fn default() -> Self {
        Self {
            formats: DEFAULT_DATE_FORMATS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl ValueValidator for DateFormatValidator {
    fn kind(&self) -> &'static str {
        KIND
    }

    fn is_valid(&self, value: &str) -> bool {
        self.matching_format(value).is_some()
    }
}

fn parses_with(value: &str, format: &str) -> bool {
    if format.eq_ignore_ascii_case(RFC3339_TOKEN) {
        return DateTime::parse_from_rfc3339(value).is_ok();
    }
    NaiveDateTime::parse_from_str(value, format).is_ok()
        || NaiveDate::parse_from_str(value, format).is_ok()
        || DateTime::parse_from_str(value, format).is_ok()
        || NaiveTime::parse_from_str(value, format).is_ok()
}

pub(super) fn build(params: &Map<String, Value>) -> Result<Arc<dyn ValueValidator>, String> {
    let params: Params = decode_params(params)?;
    let validator = match params.formats {
        Some(formats) => DateFormatValidator::new(formats)?,
        None => DateFormatValidator::default(),
    };
    Ok(Arc::new(validator))
}
