//! Sampled column values as handed over by a profiler.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// A raw sampled cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SampleValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl SampleValue {
    /// Stringified value, or `None` for nulls and blank text.
    ///
    /// Validators only ever see the values returned here.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Null => None,
            Self::Text(text) if text.trim().is_empty() => None,
            Self::Text(text) => Some(Cow::Borrowed(text.as_str())),
            Self::Bool(value) => Some(Cow::Owned(value.to_string())),
            Self::Integer(value) => Some(Cow::Owned(value.to_string())),
            Self::Float(value) => Some(Cow::Owned(value.to_string())),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_text().is_none()
    }
}

impl From<&str> for SampleValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SampleValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for SampleValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for SampleValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for SampleValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<SampleValue>> From<Option<T>> for SampleValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// One column as seen by the classifier: its name and a small value sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSample {
    pub name: String,
    pub values: Vec<SampleValue>,
}

impl ColumnSample {
    pub fn new<I, V>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<SampleValue>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of values that are neither null nor blank.
    pub fn non_empty_count(&self) -> usize {
        self.values.iter().filter(|value| !value.is_empty()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_and_null_are_empty() {
        assert!(SampleValue::Null.is_empty());
        assert!(SampleValue::from("   ").is_empty());
        assert!(SampleValue::from(None::<i64>).is_empty());
        assert!(!SampleValue::from(" a ").is_empty());
    }

    #[test]
    fn scalars_are_stringified() {
        assert_eq!(SampleValue::from(42_i64).as_text().as_deref(), Some("42"));
        assert_eq!(SampleValue::from(2.5).as_text().as_deref(), Some("2.5"));
        assert_eq!(SampleValue::from(true).as_text().as_deref(), Some("true"));
    }

    #[test]
    fn untagged_json_values() {
        let values: Vec<SampleValue> =
            serde_json::from_str(r#"[null, true, 7, 1.5, "x"]"#).expect("parse");
        assert_eq!(
            values,
            vec![
                SampleValue::Null,
                SampleValue::Bool(true),
                SampleValue::Integer(7),
                SampleValue::Float(1.5),
                SampleValue::Text("x".to_string()),
            ]
        );
    }

    #[test]
    fn column_sample_counts_non_empty() {
        let column = ColumnSample::new("email", ["a@b.com", "", "c@d.org"]);
        assert_eq!(column.values.len(), 3);
        assert_eq!(column.non_empty_count(), 2);
    }
}
