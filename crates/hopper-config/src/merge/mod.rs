//! Configuration layering, fallback logic, and CLI flag overrides

use camino::{Utf8Path, Utf8PathBuf};

use hopper_core::error::HopperError;

use crate::{toml::HopperToml, ConfigResult};

/// Main configuration loading interface
pub struct ConfigLoader {
    /// Current working directory
    cwd: Utf8PathBuf,
}

/// Where the loaded configuration came from
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// An explicit or discovered hopper.toml file
    File(Utf8PathBuf),
    /// Built-in defaults (no file found)
    Defaults,
}

/// Values supplied on the command line; highest priority layer
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// `--game-version`
    pub game_version: Option<String>,
    /// `--loader`
    pub loader: Option<String>,
    /// `--mods-dir`
    pub mods_dir: Option<Utf8PathBuf>,
    /// `--registry-url`
    pub registry_url: Option<String>,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new(cwd: Utf8PathBuf) -> Self {
        Self { cwd }
    }

    /// Load configuration: an explicit file if given, else a discovered
    /// hopper.toml, else built-in defaults.
    pub async fn load(&self, explicit: Option<&Utf8Path>) -> ConfigResult<(HopperToml, ConfigSource)> {
        if let Some(path) = explicit {
            let config = crate::toml::load_from_file(path).await?;
            return Ok((config, ConfigSource::File(path.to_owned())));
        }

        if let Some(path) = self.discover_config_file() {
            let config = crate::toml::load_from_file(&path).await?;
            return Ok((config, ConfigSource::File(path)));
        }

        Ok((HopperToml::default(), ConfigSource::Defaults))
    }

    /// Look for hopper.toml next to the working directory, then in the
    /// user's config directory.
    fn discover_config_file(&self) -> Option<Utf8PathBuf> {
        let local = self.cwd.join("hopper.toml");
        if local.exists() {
            return Some(local);
        }

        let config_dir = dirs::config_dir()?;
        let global = Utf8PathBuf::from_path_buf(config_dir).ok()?.join("hopper").join("hopper.toml");
        if global.exists() {
            return Some(global);
        }

        None
    }
}

/// Apply CLI flag overrides on top of a loaded configuration
pub fn apply_cli_overrides(mut config: HopperToml, overrides: &CliOverrides) -> HopperToml {
    if let Some(game_version) = &overrides.game_version {
        config.target.game_version = Some(game_version.clone());
    }
    if let Some(loader) = &overrides.loader {
        config.target.loader = Some(loader.to_lowercase());
    }
    if let Some(mods_dir) = &overrides.mods_dir {
        config.paths.mods_dir = Some(mods_dir.clone());
    }
    if let Some(url) = &overrides.registry_url {
        config.registry.url = url.clone();
    }
    config
}

/// Resolve the managed mods directory: the configured value if set, else
/// the platform's default `.minecraft/mods` location.
pub fn resolve_mods_dir(config: &HopperToml) -> ConfigResult<Utf8PathBuf> {
    if let Some(configured) = &config.paths.mods_dir {
        return Ok(configured.clone());
    }

    detect_minecraft_dir()
        .map(|dir| dir.join("mods"))
        .ok_or_else(|| HopperError::ConfigValidation {
            field: "paths.mods_dir".to_string(),
            reason: "Could not detect a .minecraft directory; set paths.mods_dir in hopper.toml"
                .to_string(),
        })
}

/// Platform defaults mirroring the launcher's install locations:
/// `%APPDATA%/.minecraft` on Windows, `~/Library/Application Support/minecraft`
/// on macOS when present, `~/.minecraft` otherwise.
fn detect_minecraft_dir() -> Option<Utf8PathBuf> {
    if let Ok(appdata) = std::env::var("APPDATA") {
        return Some(Utf8PathBuf::from(appdata).join(".minecraft"));
    }

    let home = Utf8PathBuf::from_path_buf(dirs::home_dir()?).ok()?;

    let mac_dir = home
        .join("Library")
        .join("Application Support")
        .join("minecraft");
    if mac_dir.exists() {
        return Some(mac_dir);
    }

    Some(home.join(".minecraft"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_defaults_when_no_file() {
        let temp_dir = TempDir::new().unwrap();
        let temp_path = Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf()).unwrap();

        let loader = ConfigLoader::new(temp_path);
        let (config, source) = loader.load(None).await.unwrap();

        assert_eq!(source, ConfigSource::Defaults);
        assert_eq!(config.registry.url, "https://api.modrinth.com/v2");
    }

    #[tokio::test]
    async fn test_load_discovers_local_file() {
        let temp_dir = TempDir::new().unwrap();
        let temp_path = Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf()).unwrap();

        let content = r#"
[target]
game_version = "1.21.1"
"#;
        tokio::fs::write(temp_path.join("hopper.toml"), content)
            .await
            .unwrap();

        let loader = ConfigLoader::new(temp_path.clone());
        let (config, source) = loader.load(None).await.unwrap();

        assert_eq!(source, ConfigSource::File(temp_path.join("hopper.toml")));
        assert_eq!(config.target.game_version.as_deref(), Some("1.21.1"));
    }

    #[tokio::test]
    async fn test_explicit_file_beats_discovery() {
        let temp_dir = TempDir::new().unwrap();
        let temp_path = Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf()).unwrap();

        let explicit = temp_path.join("custom.toml");
        tokio::fs::write(&explicit, "[target]\nloader = \"quilt\"\n")
            .await
            .unwrap();

        let loader = ConfigLoader::new(temp_path);
        let (config, source) = loader.load(Some(&explicit)).await.unwrap();

        assert_eq!(source, ConfigSource::File(explicit));
        assert_eq!(config.target.loader.as_deref(), Some("quilt"));
    }

    #[test]
    fn test_cli_overrides_take_priority() {
        let config = crate::toml::parse_hopper_toml(
            r#"
[target]
game_version = "1.20.1"
loader = "fabric"
"#,
        )
        .unwrap();

        let overrides = CliOverrides {
            game_version: Some("1.21.1".to_string()),
            loader: Some("Quilt".to_string()),
            mods_dir: Some(Utf8PathBuf::from("/tmp/mods")),
            registry_url: None,
        };

        let merged = apply_cli_overrides(config, &overrides);
        assert_eq!(merged.target.game_version.as_deref(), Some("1.21.1"));
        // Loader flag is normalized to lowercase
        assert_eq!(merged.target.loader.as_deref(), Some("quilt"));
        assert_eq!(
            merged.paths.mods_dir.as_deref().map(|p| p.as_str()),
            Some("/tmp/mods")
        );
        assert_eq!(merged.registry.url, "https://api.modrinth.com/v2");
    }

    #[test]
    fn test_resolve_mods_dir_prefers_configured() {
        let mut config = HopperToml::default();
        config.paths.mods_dir = Some(Utf8PathBuf::from("/srv/minecraft/mods"));

        let resolved = resolve_mods_dir(&config).unwrap();
        assert_eq!(resolved, Utf8PathBuf::from("/srv/minecraft/mods"));
    }
}
