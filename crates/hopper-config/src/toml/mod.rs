//! hopper.toml configuration parsing and validation

use camino::Utf8PathBuf;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use hopper_core::error::HopperError;

use crate::ConfigResult;

/// Complete hopper.toml configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HopperToml {
    /// Registry endpoint section
    #[serde(default)]
    pub registry: RegistrySection,

    /// Compatibility target defaults
    #[serde(default)]
    pub target: TargetSection,

    /// Filesystem locations
    #[serde(default)]
    pub paths: PathsSection,

    /// Manual identity overrides: derived id -> correct registry identity.
    /// Applied by exact match after manifest/filename derivation.
    #[serde(default)]
    pub overrides: IndexMap<String, String>,
}

/// Registry endpoint configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrySection {
    /// Base API URL
    #[serde(default = "default_registry_url")]
    pub url: String,
}

impl Default for RegistrySection {
    fn default() -> Self {
        Self {
            url: default_registry_url(),
        }
    }
}

/// Default compatibility target values; CLI flags and prompts fill the gaps
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetSection {
    /// Minecraft version (e.g. "1.20.1")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_version: Option<String>,

    /// Loader family (e.g. "fabric")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loader: Option<String>,
}

/// Filesystem locations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathsSection {
    /// Managed mods directory; auto-detected per platform when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mods_dir: Option<Utf8PathBuf>,
}

fn default_registry_url() -> String {
    "https://api.modrinth.com/v2".to_string()
}

impl HopperToml {
    /// Built-in identity overrides for mods whose derived slug is known to
    /// miss their registry identity.
    pub fn builtin_overrides() -> IndexMap<String, String> {
        IndexMap::from([
            ("voicechat".to_string(), "simple-voice-chat".to_string()),
            (
                "voicechat-fabric".to_string(),
                "simple-voice-chat".to_string(),
            ),
        ])
    }

    /// Override table with built-ins applied first and file entries winning
    /// on conflict.
    pub fn effective_overrides(&self) -> IndexMap<String, String> {
        let mut merged = Self::builtin_overrides();
        for (from, to) in &self.overrides {
            merged.insert(from.clone(), to.clone());
        }
        merged
    }
}

/// Parse a TOML string into a HopperToml configuration
pub fn parse_hopper_toml(content: &str) -> ConfigResult<HopperToml> {
    let config: HopperToml = toml::from_str(content).map_err(|e| HopperError::TomlParse {
        message: e.to_string(),
    })?;

    validate_config(&config)?;

    Ok(config)
}

/// Validate configuration completeness
pub fn validate_config(config: &HopperToml) -> ConfigResult<()> {
    if config.registry.url.is_empty() {
        return Err(HopperError::ConfigValidation {
            field: "registry.url".to_string(),
            reason: "Registry URL must not be empty".to_string(),
        });
    }

    if !config.registry.url.starts_with("http://") && !config.registry.url.starts_with("https://") {
        return Err(HopperError::ConfigValidation {
            field: "registry.url".to_string(),
            reason: format!("'{}' is not an http(s) URL", config.registry.url),
        });
    }

    if let Some(loader) = &config.target.loader {
        if loader.chars().any(|c| c.is_uppercase() || c.is_whitespace()) {
            return Err(HopperError::ConfigValidation {
                field: "target.loader".to_string(),
                reason: format!("'{}' must be a lowercase loader name", loader),
            });
        }
    }

    for (from, to) in &config.overrides {
        if from.is_empty() || to.is_empty() {
            return Err(HopperError::ConfigValidation {
                field: "overrides".to_string(),
                reason: "Override entries must map a non-empty id to a non-empty id".to_string(),
            });
        }
    }

    Ok(())
}

/// Load and parse hopper.toml from a file path
pub async fn load_from_file(path: &camino::Utf8Path) -> ConfigResult<HopperToml> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| HopperError::io(format!("Failed to read {}", path), e))?;

    parse_hopper_toml(&content).map_err(|e| match e {
        HopperError::TomlParse { message } => HopperError::TomlParse {
            message: format!("In file {}: {}", path, message),
        },
        other => other,
    })
}
