#![deny(unsafe_code)]

//! Field classification: column name plus value sample to field type.
//!
//! ```
//! use colsense_catalog::PatternCatalog;
//! use colsense_classify::FieldClassifier;
//! use colsense_model::SampleValue;
//!
//! let catalog = PatternCatalog::builtin().unwrap();
//! let classifier = FieldClassifier::from_catalog(&catalog);
//! let sample: Vec<SampleValue> = ["1", "2", "3", "4", "abc"]
//!     .into_iter()
//!     .map(Into::into)
//!     .collect();
//! let result = classifier.classify("customer_id", &sample);
//! assert_eq!(result.type_key, "identifier");
//! assert!(result.is_confirmed);
//! ```

pub mod classifier;
pub mod matching;
pub mod scoring;

pub use classifier::FieldClassifier;
pub use matching::{KeywordMatch, MatchSummary};
pub use scoring::{MAX_INVALID_SAMPLES, SampleScore};
