//! Value validation strategies and their registry.
//!
//! A rule's `validation.type` names a strategy. The strategy's builder turns
//! the rule's parameters into a [`ValueValidator`] once, when the rule is
//! loaded; classification then only calls [`ValueValidator::is_valid`].
//!
//! # Built-in strategies
//!
//! | Name | Parameters |
//! |------|------------|
//! | `regex` | `pattern` (required, search semantics) |
//! | `numeric` | none |
//! | `numeric_range` | `min`, `max` (optional, inclusive) |
//! | `date_format` | `formats` (optional ordered list of chrono formats) |
//! | `text_format` | `min_length`, `max_length`, `allowed_chars` |
//! | `boolean_like` | `accepted` (optional token list) |
//!
//! New strategies are added with [`ValidatorRegistry::register`]; nothing in
//! the classifier changes.

mod boolean;
mod date;
mod numeric;
mod pattern;
mod text;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

pub use boolean::{BooleanLikeValidator, DEFAULT_BOOLEAN_TOKENS};
pub use date::{DEFAULT_DATE_FORMATS, DateFormatValidator};
pub use numeric::{NumericRangeValidator, NumericValidator, parse_number};
pub use pattern::RegexValidator;
pub use text::{DEFAULT_ALLOWED_CHARS, TextFormatValidator};

/// A compiled, pure check of a single stringified value.
///
/// Implementations must never panic on malformed input: a value that cannot
/// be interpreted is simply invalid.
pub trait ValueValidator: Send + Sync + fmt::Debug {
    /// Strategy name this validator was built from.
    fn kind(&self) -> &'static str;

    fn is_valid(&self, value: &str) -> bool;
}

/// Builds a validator from a rule's strategy parameters.
///
/// Returns a human-readable message when the parameters are unusable.
pub type ValidatorBuilder = fn(&Map<String, Value>) -> Result<Arc<dyn ValueValidator>, String>;

/// Registry of validation strategies indexed by name.
#[derive(Debug, Clone)]
pub struct ValidatorRegistry {
    builders: BTreeMap<&'static str, ValidatorBuilder>,
}

impl ValidatorRegistry {
    /// A registry with no strategies.
    pub fn empty() -> Self {
        Self {
            builders: BTreeMap::new(),
        }
    }

    /// A registry holding the six built-in strategies.
    pub fn with_builtin_strategies() -> Self {
        let mut registry = Self::empty();
        registry.register(pattern::KIND, pattern::build);
        registry.register(numeric::NUMERIC_KIND, numeric::build_numeric);
        registry.register(numeric::RANGE_KIND, numeric::build_range);
        registry.register(date::KIND, date::build);
        registry.register(text::KIND, text::build);
        registry.register(boolean::KIND, boolean::build);
        registry
    }

    /// Registers a strategy, replacing any previous one with the same name.
    pub fn register(&mut self, kind: &'static str, builder: ValidatorBuilder) {
        self.builders.insert(kind, builder);
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.builders.contains_key(kind)
    }

    /// Registered strategy names, sorted.
    pub fn kinds(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.builders.keys().copied()
    }

    /// Resolves a strategy by name and compiles its parameters.
    pub fn build(
        &self,
        kind: &str,
        params: &Map<String, Value>,
    ) -> Result<Arc<dyn ValueValidator>, String> {
        let Some(builder) = self.builders.get(kind) else {
            let known: Vec<&str> = self.kinds().collect();
            return Err(format!(
                "unknown validation type '{kind}' (expected one of: {})",
                known.join(", ")
            ));
        };
        builder(params).map_err(|message| format!("invalid '{kind}' parameters: {message}"))
    }
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::with_builtin_strategies()
    }
}

static DEFAULT_REGISTRY: OnceLock<Arc<ValidatorRegistry>> = OnceLock::new();

/// Shared registry with the built-in strategies.
pub fn default_registry() -> Arc<ValidatorRegistry> {
    Arc::clone(DEFAULT_REGISTRY.get_or_init(|| Arc::new(ValidatorRegistry::default())))
}

/// Decodes strategy parameters into a typed struct.
pub fn decode_params<T: DeserializeOwned>(params: &Map<String, Value>) -> Result<T, String> {
    serde_json::from_value(Value::Object(params.clone())).map_err(|e| e.to_string())
}
