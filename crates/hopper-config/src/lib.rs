//! Configuration parsing for hopper
//!
//! This crate handles parsing and validation of hopper.toml files and the
//! layering of file values, built-in defaults, and CLI flag overrides into
//! the settings a run needs: registry endpoint, identity override table,
//! mods directory, and compatibility target.

pub mod merge;
pub mod toml;

// Re-export main types
pub use merge::{apply_cli_overrides, resolve_mods_dir, CliOverrides, ConfigLoader, ConfigSource};
pub use toml::{validate_config, HopperToml, PathsSection, RegistrySection, TargetSection};

use hopper_core::error::HopperError;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, HopperError>;
