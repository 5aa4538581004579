#![deny(unsafe_code)]

//! Configuration-driven field-pattern catalog.
//!
//! The catalog owns the rule set that maps column-name keywords to field
//! types and resolves each rule's validation strategy. It never classifies;
//! see `colsense-classify` for that.
//!
//! ```
//! use colsense_catalog::{CatalogSource, PatternCatalog};
//!
//! let catalog = PatternCatalog::from_source(CatalogSource::builtin()).unwrap();
//! let snapshot = catalog.snapshot();
//! assert!(snapshot.contains("email"));
//! ```

pub mod builtin;
pub mod catalog;
pub mod error;
mod persist;
pub mod rule;
pub mod snapshot;
pub mod source;
pub mod validators;

pub use crate::catalog::{InsertPolicy, PatternCatalog, parse_rules};
pub use crate::error::{CatalogError, Result};
pub use crate::rule::{Keyword, PatternRule};
pub use crate::snapshot::{CatalogSnapshot, CatalogSummary, ExportScope};
pub use crate::source::CatalogSource;
pub use crate::validators::{ValidatorBuilder, ValidatorRegistry, ValueValidator, default_registry};
