//! The compatibility tuple an update run resolves against.

use serde::{Deserialize, Serialize};

/// Game version plus loader family, fixed for the whole run.
///
/// Every selected version must list both fields in its registry metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityTarget {
    /// Minecraft version string as the registry spells it (e.g. "1.20.1")
    pub game_version: String,
    /// Loader family, lowercase (e.g. "fabric", "forge", "quilt")
    pub loader: String,
}

impl CompatibilityTarget {
    /// Create a new target, normalizing the loader to lowercase
    pub fn new(game_version: impl Into<String>, loader: impl Into<String>) -> Self {
        Self {
            game_version: game_version.into(),
            loader: loader.into().to_lowercase(),
        }
    }
}

impl std::fmt::Display for CompatibilityTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {}", self.game_version, self.loader)
    }
}
