//! Error types for catalog operations.
//!
//! Every error is returned synchronously by the mutating call that caused
//! it. Classification never fails, because it only reads snapshots that
//! already passed validation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from loading, mutating or exporting a pattern catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The rule-definition source failed schema validation.
    #[error("malformed pattern catalog {source_name}: {message}")]
    MalformedCatalog { source_name: String, message: String },

    /// `remove_pattern` on a type key the catalog does not hold.
    #[error("unknown field type: {type_key}")]
    UnknownType { type_key: String },

    /// Strict insert of a type key that already exists.
    #[error("field type already defined: {type_key}")]
    DuplicateKey { type_key: String },

    /// The export target could not be written.
    #[error("failed to export pattern catalog to {target}: {source}")]
    Serialization {
        target: String,
        #[source]
        source: std::io::Error,
    },

    /// The rule-definition source could not be read.
    #[error("failed to read pattern catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CatalogError {
    pub(crate) fn malformed(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedCatalog {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    pub(crate) fn serialization(target: impl Into<String>, source: std::io::Error) -> Self {
        Self::Serialization {
            target: target.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
