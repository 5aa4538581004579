//! Wire format of the rule-definition document.
//!
//! A catalog document has a single top-level mapping, `field_patterns`,
//! whose keys are type keys and whose values are [`RuleDefinition`]s:
//!
//! ```json
//! {
//!   "field_patterns": {
//!     "email": {
//!       "keywords": ["email", "mail"],
//!       "field_type": "email_field",
//!       "validation": { "type": "regex", "pattern": "^[^@]+@[^@]+\\.[^@]+$", "threshold": 0.7 },
//!       "description": "Email address"
//!     }
//!   }
//! }
//! ```
//!
//! Rule order and keyword order are preserved in both directions.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Threshold applied when a rule does not declare one.
pub const DEFAULT_THRESHOLD: f64 = 0.7;

/// Top-level rule-definition document.
///
/// Rules are kept as raw JSON values so that one malformed rule can be
/// reported with its type key rather than as a positionless parse error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub field_patterns: Map<String, Value>,
}

impl CatalogDocument {
    /// Builds a document from ordered `(type_key, definition)` pairs.
    pub fn from_definitions<'a, I>(definitions: I) -> serde_json::Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a RuleDefinition)>,
    {
        let mut field_patterns = Map::new();
        for (type_key, definition) in definitions {
            field_patterns.insert(type_key.to_string(), serde_json::to_value(definition)?);
        }
        Ok(Self { field_patterns })
    }

    /// Type keys in document order.
    pub fn type_keys(&self) -> impl Iterator<Item = &str> {
        self.field_patterns.keys().map(String::as_str)
    }

    /// Decodes every rule, in document order.
    pub fn definitions(
        &self,
    ) -> impl Iterator<Item = (&str, serde_json::Result<RuleDefinition>)> + '_ {
        self.field_patterns
            .iter()
            .map(|(type_key, value)| (type_key.as_str(), RuleDefinition::deserialize(value)))
    }
}

/// One field type as declared in a catalog document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDefinition {
    /// Keywords matched against the normalized column name.
    pub keywords: Vec<String>,
    /// Label attached to matches; defaults to `<type_key>_field`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    pub validation: ValidationSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RuleDefinition {
    pub fn new<I, S>(keywords: I, validation: ValidationSpec) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
            field_type: None,
            validation,
            description: None,
        }
    }

    #[must_use]
    pub fn with_field_type(mut self, field_type: impl Into<String>) -> Self {
        self.field_type = Some(field_type.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the validation threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.validation.threshold = Some(threshold);
        self
    }

    /// Threshold actually applied during classification.
    pub fn effective_threshold(&self) -> f64 {
        self.validation.threshold.unwrap_or(DEFAULT_THRESHOLD)
    }
}

/// Validation strategy selector plus its strategy-specific parameters.
///
/// Parameters other than `type`, `threshold` and `description` are kept
/// verbatim in `params` and handed to the strategy when the rule is compiled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationSpec {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

impl ValidationSpec {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            threshold: None,
            description: None,
            params: Map::new(),
        }
    }

    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }
}
