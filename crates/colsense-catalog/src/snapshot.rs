//! Immutable catalog snapshots.

use std::collections::BTreeSet;
use std::sync::Arc;

use colsense_model::{CatalogDocument, RuleProvenance};
use serde::Serialize;

use crate::rule::PatternRule;

/// Which rules an export includes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportScope {
    /// Every rule, built-in and custom.
    #[default]
    All,
    /// Only rules added through `add_custom_pattern`.
    CustomOnly,
}

impl ExportScope {
    fn includes(self, rule: &PatternRule) -> bool {
        match self {
            Self::All => true,
            Self::CustomOnly => rule.provenance() == RuleProvenance::Custom,
        }
    }
}

/// Overview of a catalog's contents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogSummary {
    pub total_patterns: usize,
    /// Type keys in catalog order.
    pub pattern_types: Vec<String>,
    /// Distinct validation strategies in use, sorted.
    pub validation_types: Vec<String>,
    pub builtin_count: usize,
    pub custom_count: usize,
    pub generation: u64,
}

/// A fully loaded rule set as of one point in time.
///
/// Snapshots never change; catalog mutations publish a new one.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    rules: Vec<Arc<PatternRule>>,
    generation: u64,
}

impl CatalogSnapshot {
    pub(crate) fn new(rules: Vec<Arc<PatternRule>>, generation: u64) -> Self {
        Self { rules, generation }
    }

    /// Rules in catalog order.
    pub fn rules(&self) -> &[Arc<PatternRule>] {
        &self.rules
    }

    pub fn get(&self, type_key: &str) -> Option<&Arc<PatternRule>> {
        self.rules.iter().find(|rule| rule.type_key() == type_key)
    }

    pub fn contains(&self, type_key: &str) -> bool {
        self.get(type_key).is_some()
    }

    pub(crate) fn position(&self, type_key: &str) -> Option<usize> {
        self.rules.iter().position(|rule| rule.type_key() == type_key)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Increases by one with every published mutation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn summary(&self) -> CatalogSummary {
        let validation_types: BTreeSet<&str> = self
            .rules
            .iter()
            .map(|rule| rule.validation_kind())
            .collect();
        let custom_count = self
            .rules
            .iter()
            .filter(|rule| rule.provenance() == RuleProvenance::Custom)
            .count();
        CatalogSummary {
            total_patterns: self.rules.len(),
            pattern_types: self
                .rules
                .iter()
                .map(|rule| rule.type_key().to_string())
                .collect(),
            validation_types: validation_types.into_iter().map(str::to_string).collect(),
            builtin_count: self.rules.len() - custom_count,
            custom_count,
            generation: self.generation,
        }
    }

    /// Serializable document in the same shape `load` accepts.
    pub fn to_document(&self, scope: ExportScope) -> serde_json::Result<CatalogDocument> {
        CatalogDocument::from_definitions(
            self.rules
                .iter()
                .filter(|rule| scope.includes(rule))
                .map(|rule| (rule.type_key(), rule.definition())),
        )
    }
}
