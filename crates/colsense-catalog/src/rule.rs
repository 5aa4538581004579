//! Compiled catalog rules.

use std::sync::Arc;

use colsense_model::{RuleDefinition, RuleProvenance, UNCLASSIFIED, column_tokens};

use crate::validators::{ValidatorRegistry, ValueValidator};

/// A keyword after normalization, kept both joined and as tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    text: String,
    tokens: Vec<String>,
}

impl Keyword {
    /// Normalizes a raw keyword; `None` when nothing alphanumeric remains.
    pub fn parse(raw: &str) -> Option<Self> {
        let tokens = column_tokens(raw);
        if tokens.is_empty() {
            return None;
        }
        Some(Self {
            text: tokens.join("_"),
            tokens,
        })
    }

    /// Normalized form, e.g. `email_address`.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Length in characters of the normalized form.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// One recognized field type with its validator resolved.
#[derive(Debug, Clone)]
pub struct PatternRule {
    type_key: String,
    keywords: Vec<Keyword>,
    field_type_label: String,
    threshold: f64,
    provenance: RuleProvenance,
    validator: Arc<dyn ValueValidator>,
    definition: RuleDefinition,
}

impl PatternRule {
    /// Validates a definition and resolves its validator.
    ///
    /// Returns a message describing the first problem found.
    pub fn compile(
        type_key: &str,
        definition: RuleDefinition,
        provenance: RuleProvenance,
        registry: &ValidatorRegistry,
    ) -> Result<Self, String> {
        if type_key.trim().is_empty() {
            return Err("type key must not be empty".to_string());
        }
        if type_key == UNCLASSIFIED {
            return Err(format!("type key '{UNCLASSIFIED}' is reserved"));
        }
        let threshold = definition.effective_threshold();
        if !(0.0..=1.0).contains(&threshold) {
            return Err(format!(
                "pattern '{type_key}': threshold {threshold} is outside [0, 1]"
            ));
        }
        let validator = registry
            .build(&definition.validation.kind, &definition.validation.params)
            .map_err(|message| format!("pattern '{type_key}': {message}"))?;

        let mut keywords: Vec<Keyword> = Vec::with_capacity(definition.keywords.len());
        for keyword in definition.keywords.iter().filter_map(|raw| Keyword::parse(raw)) {
            if !keywords.contains(&keyword) {
                keywords.push(keyword);
            }
        }
        if keywords.is_empty() {
            tracing::debug!(type_key, "pattern has no usable keywords and will never match");
        }

        let field_type_label = definition
            .field_type
            .clone()
            .unwrap_or_else(|| format!("{type_key}_field"));

        Ok(Self {
            type_key: type_key.to_string(),
            keywords,
            field_type_label,
            threshold,
            provenance,
            validator,
            definition,
        })
    }

    pub fn type_key(&self) -> &str {
        &self.type_key
    }

    /// Normalized keywords in declaration order, duplicates removed.
    pub fn keywords(&self) -> &[Keyword] {
        &self.keywords
    }

    pub fn field_type_label(&self) -> &str {
        &self.field_type_label
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn provenance(&self) -> RuleProvenance {
        self.provenance
    }

    pub fn validation_kind(&self) -> &str {
        &self.definition.validation.kind
    }

    pub fn description(&self) -> Option<&str> {
        self.definition
            .description
            .as_deref()
            .or(self.definition.validation.description.as_deref())
    }

    /// The definition exactly as it was loaded or added.
    pub fn definition(&self) -> &RuleDefinition {
        &self.definition
    }

    /// Runs the rule's validator against one stringified value.
    pub fn validate(&self, value: &str) -> bool {
        self.validator.is_valid(value)
    }
}

#[cfg(test)]
mod tests {
    use colsense_model::ValidationSpec;

    use super::*;

    fn compile(definition: RuleDefinition) -> Result<PatternRule, String> {
        PatternRule::compile(
            "identifier",
            definition,
            RuleProvenance::BuiltIn,
            &ValidatorRegistry::default(),
        )
    }

    #[test]
    fn keywords_are_normalized_and_deduplicated() {
        let definition = RuleDefinition::new(
            ["ID", "id", "CustomerKey", "__", "customer-key"],
            ValidationSpec::new("numeric"),
        );
        let rule = compile(definition).expect("compile");
        let keywords: Vec<&str> = rule.keywords().iter().map(Keyword::as_str).collect();
        assert_eq!(keywords, vec!["id", "customer_key"]);
        assert_eq!(rule.keywords()[1].len(), 12);
    }

    #[test]
    fn label_and_threshold_defaults() {
        let rule = compile(RuleDefinition::new(["id"], ValidationSpec::new("numeric")))
            .expect("compile");
        assert_eq!(rule.field_type_label(), "identifier_field");
        assert_eq!(rule.threshold(), 0.7);
        assert_eq!(rule.validation_kind(), "numeric");
    }

    #[test]
    fn threshold_out_of_range_is_rejected() {
        for threshold in [-0.1, 1.5, f64::NAN] {
            let definition = RuleDefinition::new(["id"], ValidationSpec::new("numeric"))
                .with_threshold(threshold);
            let err = compile(definition).unwrap_err();
            assert!(err.contains("outside [0, 1]"), "{err}");
        }
    }

    #[test]
    fn reserved_type_key_is_rejected() {
        let err = PatternRule::compile(
            UNCLASSIFIED,
            RuleDefinition::new(["x"], ValidationSpec::new("numeric")),
            RuleProvenance::Custom,
            &ValidatorRegistry::default(),
        )
        .unwrap_err();
        assert!(err.contains("reserved"));
    }

    #[test]
    fn empty_keywords_are_inert_not_an_error() {
        let definition = RuleDefinition::new(Vec::<String>::new(), ValidationSpec::new("numeric"));
        let rule = compile(definition).expect("compile");
        assert!(rule.keywords().is_empty());
    }

    #[test]
    fn description_falls_back_to_validation_description() {
        let mut validation = ValidationSpec::new("numeric");
        validation.description = Some("Numeric identifier".to_string());
        let rule = compile(RuleDefinition::new(["id"], validation)).expect("compile");
        assert_eq!(rule.description(), Some("Numeric identifier"));
    }
}
