use serde::{Deserialize, Serialize};

/// Type key reported for columns no rule recognizes.
pub const UNCLASSIFIED: &str = "unclassified";

/// Outcome of classifying one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub column_name: String,
    /// Winning rule's type key, or [`UNCLASSIFIED`].
    pub type_key: String,
    pub field_type_label: String,
    /// Normalized keyword that selected the rule.
    pub matched_keyword: Option<String>,
    /// Fraction of non-empty sampled values passing validation.
    pub match_score: f64,
    /// Threshold of the winning rule, `None` when unclassified.
    pub threshold: Option<f64>,
    /// `match_score >= threshold`.
    pub is_confirmed: bool,
    pub valid_count: usize,
    pub total_count: usize,
    /// First few values that failed validation.
    pub invalid_samples: Vec<String>,
}

impl ClassificationResult {
    pub fn unclassified(column_name: impl Into<String>) -> Self {
        Self {
            column_name: column_name.into(),
            type_key: UNCLASSIFIED.to_string(),
            field_type_label: UNCLASSIFIED.to_string(),
            matched_keyword: None,
            match_score: 0.0,
            threshold: None,
            is_confirmed: false,
            valid_count: 0,
            total_count: 0,
            invalid_samples: Vec::new(),
        }
    }

    /// True when a rule recognized the column name.
    pub fn is_classified(&self) -> bool {
        self.matched_keyword.is_some()
    }
}
