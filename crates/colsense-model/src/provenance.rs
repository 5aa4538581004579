use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a catalog rule came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleProvenance {
    /// Declared by the loaded rule-definition source.
    BuiltIn,
    /// Added at runtime through `add_custom_pattern`.
    Custom,
}

impl RuleProvenance {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BuiltIn => "built-in",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for RuleProvenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
