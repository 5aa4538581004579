//! Keyword matching against normalized column names.
//!
//! A keyword matches when its token sequence occurs as a contiguous run of
//! the column's tokens. `email_address` matches `customer_email_address`,
//! `id` matches `customer_id` and `ID_NUMBER`, but `id` does not match
//! `widget_flag` or `valid_from`.

use std::cmp::Ordering;
use std::sync::Arc;

use colsense_catalog::{CatalogSnapshot, Keyword, PatternRule};
use serde::Serialize;

/// A rule selected by one of its keywords.
#[derive(Debug, Clone)]
pub struct KeywordMatch {
    rule: Arc<PatternRule>,
    /// Index of the rule in catalog order.
    position: usize,
    keyword: Keyword,
}

impl KeywordMatch {
    pub fn rule(&self) -> &Arc<PatternRule> {
        &self.rule
    }

    pub fn type_key(&self) -> &str {
        self.rule.type_key()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Normalized form of the keyword that matched.
    pub fn keyword(&self) -> &str {
        self.keyword.as_str()
    }

    pub fn keyword_len(&self) -> usize {
        self.keyword.len()
    }

    /// Plain summary for reports.
    pub fn describe(&self) -> MatchSummary {
        MatchSummary {
            type_key: self.type_key().to_string(),
            field_type_label: self.rule.field_type_label().to_string(),
            keyword: self.keyword().to_string(),
            position: self.position,
        }
    }

    /// Longest keyword first, then earliest rule.
    fn rank(&self, other: &Self) -> Ordering {
        other
            .keyword_len()
            .cmp(&self.keyword_len())
            .then(self.position.cmp(&other.position))
    }
}

/// Serializable view of a [`KeywordMatch`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    pub type_key: String,
    pub field_type_label: String,
    pub keyword: String,
    pub position: usize,
}

/// True when `needle` occurs as a contiguous run inside `haystack`.
pub fn contains_token_run(haystack: &[String], needle: &[String]) -> bool {
    !needle.is_empty()
        && needle.len() <= haystack.len()
        && haystack.windows(needle.len()).any(|window| window == needle)
}

/// The longest keyword of `rule` found in `tokens`; the first declared wins
/// among equally long keywords.
pub fn best_keyword<'r>(rule: &'r PatternRule, tokens: &[String]) -> Option<&'r Keyword> {
    let mut best: Option<&Keyword> = None;
    for keyword in rule.keywords() {
        if !contains_token_run(tokens, keyword.tokens()) {
            continue;
        }
        if best.is_none_or(|current| keyword.len() > current.len()) {
            best = Some(keyword);
        }
    }
    best
}

/// Every matching rule, ranked by keyword length then catalog order.
pub fn ranked_matches(snapshot: &CatalogSnapshot, tokens: &[String]) -> Vec<KeywordMatch> {
    let mut matches: Vec<KeywordMatch> = snapshot
        .rules()
        .iter()
        .enumerate()
        .filter_map(|(position, rule)| {
            best_keyword(rule, tokens).map(|keyword| KeywordMatch {
                rule: Arc::clone(rule),
                position,
                keyword: keyword.clone(),
            })
        })
        .collect();
    matches.sort_by(KeywordMatch::rank);
    matches
}

/// The winning match, if any rule matches.
pub fn best_match(snapshot: &CatalogSnapshot, tokens: &[String]) -> Option<KeywordMatch> {
    let mut winner: Option<KeywordMatch> = None;
    for (position, rule) in snapshot.rules().iter().enumerate() {
        let Some(keyword) = best_keyword(rule, tokens) else {
            continue;
        };
        // Strictly longer only: earlier rules keep ties.
        if winner
            .as_ref()
            .is_none_or(|current| keyword.len() > current.keyword_len())
        {
            winner = Some(KeywordMatch {
                rule: Arc::clone(rule),
                position,
                keyword: keyword.clone(),
            });
        }
    }
    winner
}
