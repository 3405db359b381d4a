//! Canonical registry identity for a mod.

use serde::{Deserialize, Serialize};

/// Canonical registry key for a mod, distinct from its display title or
/// local filename. Two archives that resolve to the same identity are the
/// same logical mod.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectIdentity(String);

impl ProjectIdentity {
    /// Create a new identity from a registry slug or id
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The identity as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProjectIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProjectIdentity {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for ProjectIdentity {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}
