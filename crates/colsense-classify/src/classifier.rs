//! Column classification over a catalog snapshot.

use std::sync::Arc;

use colsense_catalog::{CatalogSnapshot, PatternCatalog};
use colsense_model::{ClassificationResult, ColumnSample, SampleValue, column_tokens};
use tracing::debug;

use crate::matching::{KeywordMatch, best_match, ranked_matches};
use crate::scoring::score_sample;

/// Maps column names and value samples to field types.
///
/// A classifier is bound to one immutable snapshot, so every call on it sees
/// the same rule set even while the catalog is being reloaded. Build a new
/// classifier (or call [`FieldClassifier::refresh`]) to pick up changes.
#[derive(Debug, Clone)]
pub struct FieldClassifier {
    snapshot: Arc<CatalogSnapshot>,
}

impl FieldClassifier {
    pub fn new(snapshot: Arc<CatalogSnapshot>) -> Self {
        Self { snapshot }
    }

    /// A classifier over the catalog's current snapshot.
    pub fn from_catalog(catalog: &PatternCatalog) -> Self {
        Self::new(catalog.snapshot())
    }

    pub fn snapshot(&self) -> &Arc<CatalogSnapshot> {
        &self.snapshot
    }

    /// Rebinds to the catalog's current snapshot. Returns true when the
    /// rule set changed.
    pub fn refresh(&mut self, catalog: &PatternCatalog) -> bool {
        let latest = catalog.snapshot();
        let changed = latest.generation() != self.snapshot.generation();
        self.snapshot = latest;
        changed
    }

    /// The rule the column name selects, without looking at any values.
    pub fn identify(&self, column_name: &str) -> Option<KeywordMatch> {
        best_match(&self.snapshot, &column_tokens(column_name))
    }

    /// Every rule the column name matches, best first.
    pub fn candidates(&self, column_name: &str) -> Vec<KeywordMatch> {
        ranked_matches(&self.snapshot, &column_tokens(column_name))
    }

    /// Identifies the column by name and validates its sample.
    ///
    /// Never fails. An unmatched name yields an `unclassified` result without
    /// running any validator; a matched name keeps its type key even when the
    /// sample has nothing to validate.
    pub fn classify(&self, column_name: &str, sample: &[SampleValue]) -> ClassificationResult {
        let Some(found) = self.identify(column_name) else {
            debug!(column = column_name, "no field pattern matched");
            return ClassificationResult::unclassified(column_name);
        };

        let rule = found.rule();
        let score = score_sample(rule, sample);
        let match_score = score.match_score();
        let is_confirmed = score.is_confirmed(rule.threshold());
        debug!(
            column = column_name,
            type_key = rule.type_key(),
            keyword = found.keyword(),
            valid = score.valid,
            total = score.total,
            match_score,
            is_confirmed,
            "classified column"
        );

        ClassificationResult {
            column_name: column_name.to_string(),
            type_key: rule.type_key().to_string(),
            field_type_label: rule.field_type_label().to_string(),
            matched_keyword: Some(found.keyword().to_string()),
            match_score,
            threshold: Some(rule.threshold()),
            is_confirmed,
            valid_count: score.valid,
            total_count: score.total,
            invalid_samples: score.invalid_samples,
        }
    }

    pub fn classify_column(&self, column: &ColumnSample) -> ClassificationResult {
        self.classify(&column.name, &column.values)
    }

    /// Classifies a batch of columns, one result per column in input order.
    pub fn classify_columns(&self, columns: &[ColumnSample]) -> Vec<ClassificationResult> {
        columns
            .iter()
            .map(|column| self.classify_column(column))
            .collect()
    }
}
