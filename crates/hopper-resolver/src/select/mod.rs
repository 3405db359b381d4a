//! Selecting the best compatible version from a registry listing.
//!
//! The input list comes from `RegistryClient::list_versions`, which
//! guarantees the registry's newest-first ordering. Selection only filters
//! and never re-sorts: registries do not guarantee parseable version
//! numbers, but they do guarantee recency ordering and a reliable release
//! flag, so "first surviving element" is "latest".

use hopper_core::types::CompatibilityTarget;
use hopper_registry::{Version, VersionType};

/// Whether a version supports the target game version and loader
fn is_compatible(version: &Version, target: &CompatibilityTarget) -> bool {
    version
        .game_versions
        .iter()
        .any(|gv| gv == &target.game_version)
        && version.loaders.iter().any(|l| l == &target.loader)
}

/// Pick the best version for the target: filter to compatible versions,
/// prefer stable releases when any exist, take the newest survivor.
pub fn select_best<'a>(
    versions: &'a [Version],
    target: &CompatibilityTarget,
) -> Option<&'a Version> {
    let candidates: Vec<&Version> = versions
        .iter()
        .filter(|v| is_compatible(v, target))
        .collect();

    candidates
        .iter()
        .find(|v| v.version_type == VersionType::Release)
        .or_else(|| candidates.first())
        .copied()
}
