//! Per-table profiling on top of the field classifier.
//!
//! The classifier answers per column; this module rolls the answers up into
//! the mapping insights shown in reports: the table's naming convention,
//! which columns carry recognizable field types, where the sample disagrees
//! with the name, and an overall mapping complexity.

use std::fmt;
use std::path::Path;

use anyhow::Result;
use colsense_classify::FieldClassifier;
use colsense_model::ClassificationResult;
use serde::Serialize;
use tracing::{info, info_span, trace};

use crate::ingest::{TableSample, read_csv_sample};
use crate::logging::redact_value;

/// Default number of rows sampled per table.
pub const DEFAULT_SAMPLE_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileOptions {
    /// Data rows read per table.
    pub sample_size: usize,
}

impl Default for ProfileOptions {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }
}

/// Dominant column naming style of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NamingConvention {
    #[serde(rename = "snake_case")]
    SnakeCase,
    #[serde(rename = "PascalCase")]
    PascalCase,
    #[serde(rename = "UPPER_CASE")]
    UpperCase,
    #[serde(rename = "mixed")]
    Mixed,
    #[serde(rename = "unknown")]
    Unknown,
}

impl NamingConvention {
    /// Classifies a set of column names. A style wins when it covers more
    /// than half of the columns; styles are checked in the order snake,
    /// Pascal, upper.
    pub fn detect<S: AsRef<str>>(columns: &[S]) -> Self {
        if columns.is_empty() {
            return Self::Unknown;
        }
        let (mut snake, mut pascal, mut upper) = (0usize, 0usize, 0usize);
        for column in columns {
            let name = column.as_ref();
            if name.contains('_') && is_all_lower(name) {
                snake += 1;
            } else if name.chars().next().is_some_and(char::is_uppercase)
                && !is_all_upper(name)
            {
                pascal += 1;
            } else if is_all_upper(name) {
                upper += 1;
            }
        }
        let majority = |count: usize| count * 2 > columns.len();
        if majority(snake) {
            Self::SnakeCase
        } else if majority(pascal) {
            Self::PascalCase
        } else if majority(upper) {
            Self::UpperCase
        } else {
            Self::Mixed
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SnakeCase => "snake_case",
            Self::PascalCase => "PascalCase",
            Self::UpperCase => "UPPER_CASE",
            Self::Mixed => "mixed",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for NamingConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Has a cased character and no uppercase one.
fn is_all_lower(name: &str) -> bool {
    name.chars().any(char::is_lowercase) && !name.chars().any(char::is_uppercase)
}

/// Has a cased character and no lowercase one.
fn is_all_upper(name: &str) -> bool {
    name.chars().any(char::is_uppercase) && !name.chars().any(char::is_lowercase)
}

/// How much manual work mapping the table is likely to need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MappingComplexity {
    Low,
    Medium,
    High,
}

impl MappingComplexity {
    /// `HIGH` above three issues, `MEDIUM` above one, else `LOW`.
    pub fn from_issue_count(issues: usize) -> Self {
        if issues > 3 {
            Self::High
        } else if issues > 1 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl fmt::Display for MappingComplexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A column whose name was recognized and whose sample had values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SamplePattern {
    pub column: String,
    pub field_type_label: String,
}

/// A recognized column whose sample did not reach the rule's threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PotentialIssue {
    pub column: String,
    pub type_key: String,
    pub match_score: f64,
    /// First few failing values.
    pub invalid_values: Vec<String>,
}

impl fmt::Display for PotentialIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {:.0}% valid {}",
            self.column,
            self.match_score * 100.0,
            self.type_key
        )?;
        if !self.invalid_values.is_empty() {
            write!(f, "; invalid: {}", self.invalid_values.join(", "))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappingInsights {
    pub naming_convention: NamingConvention,
    pub sample_patterns: Vec<SamplePattern>,
    pub data_type_notes: Vec<String>,
    pub potential_issues: Vec<PotentialIssue>,
    pub mapping_complexity: MappingComplexity,
}

impl MappingInsights {
    /// Rolls per-column results up into table insights.
    ///
    /// Columns without any non-empty sampled value contribute nothing.
    pub fn from_results(
        naming_convention: NamingConvention,
        results: &[ClassificationResult],
    ) -> Self {
        let mut sample_patterns = Vec::new();
        let mut data_type_notes = Vec::new();
        let mut potential_issues = Vec::new();
        for result in results
            .iter()
            .filter(|result| result.is_classified() && result.total_count > 0)
        {
            sample_patterns.push(SamplePattern {
                column: result.column_name.clone(),
                field_type_label: result.field_type_label.clone(),
            });
            if result.is_confirmed {
                data_type_notes.push(format!(
                    "{}: valid {} format in sample",
                    result.column_name, result.type_key
                ));
            } else {
                potential_issues.push(PotentialIssue {
                    column: result.column_name.clone(),
                    type_key: result.type_key.clone(),
                    match_score: result.match_score,
                    invalid_values: result.invalid_samples.clone(),
                });
            }
        }
        let mapping_complexity = MappingComplexity::from_issue_count(potential_issues.len());
        Self {
            naming_convention,
            sample_patterns,
            data_type_notes,
            potential_issues,
            mapping_complexity,
        }
    }
}

/// Profile of one table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableProfile {
    pub table_name: String,
    pub row_count: usize,
    pub column_count: usize,
    pub columns: Vec<ClassificationResult>,
    pub insights: MappingInsights,
}

impl TableProfile {
    pub fn confirmed_count(&self) -> usize {
        self.columns.iter().filter(|column| column.is_confirmed).count()
    }

    pub fn classified_count(&self) -> usize {
        self.columns.iter().filter(|column| column.is_classified()).count()
    }
}

/// Classifies every column of a sampled table and derives its insights.
pub fn profile_table(classifier: &FieldClassifier, table: &TableSample) -> TableProfile {
    let span = info_span!("profile_table", table = %table.name);
    let _guard = span.enter();

    let columns = classifier.classify_columns(&table.column_samples());
    for result in &columns {
        for value in &result.invalid_samples {
            trace!(
                column = %result.column_name,
                value = redact_value(value),
                "value failed validation"
            );
        }
    }
    let naming_convention = NamingConvention::detect(table.columns.as_slice());
    let insights = MappingInsights::from_results(naming_convention, &columns);
    info!(
        columns = columns.len(),
        rows = table.row_count,
        naming = %naming_convention,
        complexity = %insights.mapping_complexity,
        issues = insights.potential_issues.len(),
        "profiled table"
    );
    TableProfile {
        table_name: table.name.clone(),
        row_count: table.row_count,
        column_count: table.columns.len(),
        columns,
        insights,
    }
}

/// Reads a CSV sample and profiles it.
pub fn profile_csv(
    classifier: &FieldClassifier,
    path: &Path,
    options: &ProfileOptions,
) -> Result<TableProfile> {
    let table = read_csv_sample(path, options.sample_size)?;
    Ok(profile_table(classifier, &table))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn naming_convention_needs_a_majority() {
        assert_eq!(
            NamingConvention::detect(&["customer_id", "email_address", "Name"]),
            NamingConvention::SnakeCase
        );
        assert_eq!(
            NamingConvention::detect(&["CustomerId", "EmailAddress", "zip"]),
            NamingConvention::PascalCase
        );
        assert_eq!(
            NamingConvention::detect(&["CUSTOMER_ID", "EMAIL", "zip"]),
            NamingConvention::UpperCase
        );
        assert_eq!(
            NamingConvention::detect(&["customer_id", "Email", "ZIP", "phone"]),
            NamingConvention::Mixed
        );
        assert_eq!(NamingConvention::detect::<&str>(&[]), NamingConvention::Unknown);
    }

    #[test]
    fn single_lowercase_words_are_not_snake_case() {
        assert_eq!(
            NamingConvention::detect(&["id", "email", "phone"]),
            NamingConvention::Mixed
        );
    }

    #[test]
    fn complexity_follows_issue_count() {
        assert_eq!(MappingComplexity::from_issue_count(0), MappingComplexity::Low);
        assert_eq!(MappingComplexity::from_issue_count(1), MappingComplexity::Low);
        assert_eq!(MappingComplexity::from_issue_count(2), MappingComplexity::Medium);
        assert_eq!(MappingComplexity::from_issue_count(3), MappingComplexity::Medium);
        assert_eq!(MappingComplexity::from_issue_count(4), MappingComplexity::High);
    }

    #[test]
    fn issue_display_lists_invalid_values() {
        let issue = PotentialIssue {
            column: "email".to_string(),
            type_key: "email".to_string(),
            match_score: 0.5,
            invalid_values: vec!["bad".to_string(), "worse".to_string()],
        };
        assert_eq!(issue.to_string(), "email: 50% valid email; invalid: bad, worse");
    }
}
