//! Rule set compiled into the crate.
//!
//! Used when no catalog file is supplied, and as the fallback when the
//! configured file does not exist.

/// Source name reported for the embedded rule set.
pub const BUILTIN_SOURCE_NAME: &str = "<builtin field patterns>";

/// The embedded rule-definition document.
pub const BUILTIN_PATTERNS: &str = include_str!("../patterns/field_patterns.json");
