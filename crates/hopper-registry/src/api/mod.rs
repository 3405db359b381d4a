//! Modrinth v2 API response types

use serde::{Deserialize, Serialize};

/// Project payload from `/project/{id}` or a search hit.
///
/// Search hits carry the slug under the same field name, so a single type
/// covers both shapes; fields hopper never reads are left to serde's
/// unknown-field handling.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Project {
    /// Registry slug, the canonical identity
    pub slug: String,
    /// Display title
    pub title: String,
    /// Internal project id (search hits expose it as `project_id`)
    #[serde(alias = "project_id")]
    pub id: Option<String>,
    /// Short description
    pub description: Option<String>,
}

/// Search response from `/search`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResults {
    /// Ranked hits, best first
    pub hits: Vec<Project>,
    /// Total number of matches on the registry side
    #[serde(default)]
    pub total_hits: u64,
}

/// Release channel of a version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionType {
    Release,
    Beta,
    Alpha,
}

/// A single version from `/project/{id}/version`.
///
/// The registry returns these newest-first; `RegistryClient::list_versions`
/// documents that ordering as a guarantee for the selector.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Version {
    /// Version id
    pub id: Option<String>,
    /// Human version number (e.g. "0.5.3+mc1.20.1")
    pub version_number: String,
    /// Release channel
    pub version_type: VersionType,
    /// Game versions this build supports
    #[serde(default)]
    pub game_versions: Vec<String>,
    /// Loader families this build supports
    #[serde(default)]
    pub loaders: Vec<String>,
    /// Distributable files, with exactly one marked primary
    #[serde(default)]
    pub files: Vec<VersionFile>,
    /// Declared relationships to other projects
    #[serde(default)]
    pub dependencies: Vec<VersionDependency>,
}

impl Version {
    /// The file designated as the one to install, if any
    pub fn primary_file(&self) -> Option<&VersionFile> {
        self.files.iter().find(|f| f.primary)
    }
}

/// One downloadable file within a version
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VersionFile {
    /// Filename to write locally
    pub filename: String,
    /// Download URL
    pub url: String,
    /// Whether this is the designated install artifact
    #[serde(default)]
    pub primary: bool,
}

/// Declared relationship from a version to another project
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VersionDependency {
    /// Target project identity; absent for version-pinned relationships
    pub project_id: Option<String>,
    /// Relationship kind
    pub dependency_type: DependencyKind,
}

/// Kind of dependency relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    /// The depending version cannot function without the target installed
    Required,
    /// Works without the target, enhanced with it
    Optional,
    /// Must not be installed alongside the target
    Incompatible,
    /// The target ships inside the depending version's own file
    Embedded,
}

impl DependencyKind {
    /// Whether the resolver must pull the target in
    pub fn is_required(&self) -> bool {
        matches!(self, DependencyKind::Required)
    }
}
