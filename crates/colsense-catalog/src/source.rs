//! Byte-stream sources a catalog can be loaded from.

use std::fs;
use std::path::{Path, PathBuf};

use crate::builtin::{BUILTIN_PATTERNS, BUILTIN_SOURCE_NAME};
use crate::error::{CatalogError, Result};

/// Where a rule-definition document comes from.
///
/// The catalog remembers the last source it loaded so that `reload(None)`
/// can re-read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// A JSON file on disk, re-read on every load.
    File(PathBuf),
    /// An in-memory document.
    Inline { name: String, bytes: Vec<u8> },
}

impl CatalogSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    pub fn inline(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self::Inline {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// The rule set compiled into this crate.
    pub fn builtin() -> Self {
        Self::inline(BUILTIN_SOURCE_NAME, BUILTIN_PATTERNS)
    }

    /// Human-readable name used in logs and errors.
    pub fn name(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Inline { name, .. } => name.clone(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File(path) => Some(path),
            Self::Inline { .. } => None,
        }
    }

    pub(crate) fn read(&self) -> Result<Vec<u8>> {
        match self {
            Self::File(path) => fs::read(path).map_err(|source| CatalogError::Io {
                path: path.clone(),
                source,
            }),
            Self::Inline { bytes, .. } => Ok(bytes.clone()),
        }
    }
}
