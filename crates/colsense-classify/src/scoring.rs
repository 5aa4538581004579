//! Sample validation and scoring.

use colsense_catalog::PatternRule;
use colsense_model::SampleValue;

/// How many failing values a result keeps for reporting.
pub const MAX_INVALID_SAMPLES: usize = 3;

/// Validation tally for one column sample.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleScore {
    /// Non-empty values that passed.
    pub valid: usize,
    /// Non-empty values seen.
    pub total: usize,
    /// First failing values, in sample order.
    pub invalid_samples: Vec<String>,
}

impl SampleScore {
    /// `valid / total`, or `0.0` when there was nothing to validate.
    pub fn match_score(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.valid as f64 / self.total as f64
        }
    }

    /// Whether the score reaches `threshold`. Never true for an empty tally.
    pub fn is_confirmed(&self, threshold: f64) -> bool {
        self.total > 0 && self.match_score() >= threshold
    }
}

/// Runs the rule's validator over every non-empty sampled value.
pub fn score_sample(rule: &PatternRule, values: &[SampleValue]) -> SampleScore {
    let mut score = SampleScore::default();
    for text in values.iter().filter_map(SampleValue::as_text) {
        score.total += 1;
        if rule.validate(&text) {
            score.valid += 1;
        } else if score.invalid_samples.len() < MAX_INVALID_SAMPLES {
            score.invalid_samples.push(text.into_owned());
        }
    }
    score
}

#[cfg(test)]
mod tests {
    use colsense_catalog::default_registry;
    use colsense_model::{RuleDefinition, RuleProvenance, ValidationSpec};

    use super::*;

    fn numeric_rule() -> PatternRule {
        PatternRule::compile(
            "identifier",
            RuleDefinition::new(["id"], ValidationSpec::new("numeric")).with_threshold(0.8),
            RuleProvenance::BuiltIn,
            &default_registry(),
        )
        .expect("compile")
    }

    #[test]
    fn empty_values_are_excluded_from_both_counts() {
        let values = vec![
            SampleValue::from("1"),
            SampleValue::Null,
            SampleValue::from("   "),
            SampleValue::from(2_i64),
            SampleValue::from("x"),
        ];
        let score = score_sample(&numeric_rule(), &values);
        assert_eq!(score.total, 3);
        assert_eq!(score.valid, 2);
        assert_eq!(score.invalid_samples, vec!["x"]);
    }

    #[test]
    fn keeps_only_the_first_invalid_values() {
        let values: Vec<SampleValue> = ["a", "b", "1", "c", "d"]
            .into_iter()
            .map(SampleValue::from)
            .collect();
        let score = score_sample(&numeric_rule(), &values);
        assert_eq!(score.invalid_samples, vec!["a", "b", "c"]);
        assert_eq!(score.valid, 1);
    }

    #[test]
    fn empty_tally_scores_zero_and_is_never_confirmed() {
        let score = score_sample(&numeric_rule(), &[SampleValue::Null]);
        assert_eq!(score.match_score(), 0.0);
        assert!(!score.is_confirmed(0.0));
    }

    #[test]
    fn threshold_is_inclusive() {
        let score = SampleScore {
            valid: 4,
            total: 5,
            invalid_samples: Vec::new(),
        };
        assert!(score.is_confirmed(0.8));
        assert!(!score.is_confirmed(0.800_001));
    }
}
