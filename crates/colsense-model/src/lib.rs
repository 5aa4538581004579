#![deny(unsafe_code)]

//! Data model shared by the pattern catalog, the field classifier and the
//! profiler front end.

pub mod classification;
pub mod definition;
pub mod names;
pub mod provenance;
pub mod sample;

pub use classification::{ClassificationResult, UNCLASSIFIED};
pub use definition::{CatalogDocument, DEFAULT_THRESHOLD, RuleDefinition, ValidationSpec};
pub use names::{column_tokens, normalize_name};
pub use provenance::RuleProvenance;
pub use sample::{ColumnSample, SampleValue};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_result_serializes() {
        let result = ClassificationResult::unclassified("widget_flag");
        let json = serde_json::to_string(&result).expect("serialize result");
        let round: ClassificationResult = serde_json::from_str(&json).expect("deserialize result");
        assert_eq!(round, result);
        assert_eq!(round.type_key, UNCLASSIFIED);
    }
}
