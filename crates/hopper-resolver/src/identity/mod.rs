//! Mapping a local archive to a canonical registry identity.
//!
//! Priority order, first success wins: embedded manifest identity, filename
//! heuristic, manual override table, then confirmation against the registry
//! (direct lookup, falling back to name search). An archive that fails every
//! step is unidentifiable and takes no further part in resolution.

use std::sync::Arc;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use hopper_core::types::LocalArchive;
use hopper_registry::{Project, RegistryClient};

use crate::manifest;

/// Loader-family tokens stripped from filenames, with their surrounding
/// `-`/`_`/`.` delimiters. Input is lowercased before matching.
static LOADER_TOKENS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-_.]?(fabric|forge|quilt|neo\w*)[-_.]?").unwrap());

/// First delimiter-prefixed digit, treated as the start of a version suffix
static VERSION_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-_.]?\d").unwrap());

/// Derive a candidate registry slug from an archive filename.
///
/// Pure function: lowercase, strip the archive extension, delete loader
/// tokens, truncate at the version suffix, trim stray delimiters.
pub fn slug_from_filename(filename: &str) -> String {
    let lower = filename.to_lowercase();
    let stem = lower
        .strip_suffix(".jar.disabled")
        .or_else(|| lower.strip_suffix(".jar"))
        .unwrap_or(&lower);

    let stripped = LOADER_TOKENS.replace_all(stem, "");
    let truncated = match VERSION_SUFFIX.find(&stripped) {
        Some(m) => &stripped[..m.start()],
        None => &stripped,
    };

    truncated
        .trim_matches(|c| matches!(c, '-' | '_' | '.'))
        .to_string()
}

/// Maps a local archive to a confirmed registry project.
pub struct IdentityResolver {
    client: Arc<RegistryClient>,
    overrides: IndexMap<String, String>,
}

impl IdentityResolver {
    /// Create a resolver with the run's override table
    pub fn new(client: Arc<RegistryClient>, overrides: IndexMap<String, String>) -> Self {
        Self { client, overrides }
    }

    /// Candidate identity before registry confirmation: manifest identity if
    /// the jar carries one, else the filename heuristic, with the override
    /// table applied to the result either way.
    pub fn candidate_identity(&self, archive: &LocalArchive) -> String {
        let candidate = manifest::read_manifest(&archive.path)
            .and_then(|m| m.registry_identity().map(str::to_string))
            .unwrap_or_else(|| slug_from_filename(&archive.filename));

        match self.overrides.get(&candidate) {
            Some(corrected) => {
                debug!(from = %candidate, to = %corrected, "identity override applied");
                corrected.clone()
            }
            None => candidate,
        }
    }

    /// Resolve an archive to a confirmed registry project, or absence.
    ///
    /// Confirmation transport failures are absence, never fatal: an archive
    /// that cannot be confirmed simply becomes a Not Found report row.
    pub async fn resolve(&self, archive: &LocalArchive) -> Option<Project> {
        let candidate = self.candidate_identity(archive);
        if candidate.is_empty() {
            return None;
        }

        match self.client.fetch_project(&candidate).await {
            Ok(Some(project)) => return Some(project),
            Ok(None) => debug!(candidate = %candidate, "no direct project match, searching"),
            Err(e) => {
                warn!(candidate = %candidate, error = %e, "project lookup failed, searching")
            }
        }

        match self.client.search_project(&candidate).await {
            Ok(hit) => hit,
            Err(e) => {
                warn!(candidate = %candidate, error = %e, "search failed, treating as absent");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs::File;
    use std::io::Write;

    use camino::Utf8PathBuf;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use zip::write::FileOptions;
    use zip::ZipWriter;

    #[test]
    fn test_slug_strips_loader_and_version() {
        assert_eq!(slug_from_filename("sodium-fabric-0.5.3.jar"), "sodium");
        // Both delimiters around the loader token are consumed, as the
        // heuristic has always done
        assert_eq!(slug_from_filename("lithium-fabric-mc1.20.1-0.11.2.jar"), "lithiummc");
        assert_eq!(slug_from_filename("Iris_1.20.1_v1.6.11.jar"), "iris");
        assert_eq!(slug_from_filename("journeymap-1.20.1-5.9.18-forge.jar"), "journeymap");
    }

    #[test]
    fn test_slug_voicechat_fixture() {
        // Derived slug lands on the override key, not the final identity
        assert_eq!(slug_from_filename("voicechat-fabric-1.20.1-2.5.0.jar"), "voicechat");
    }

    #[test]
    fn test_slug_neoforge_variants() {
        assert_eq!(slug_from_filename("jei-neoforge-17.3.0.jar"), "jei");
        assert_eq!(slug_from_filename("appleskin-neo-2.5.1.jar"), "appleskin");
    }

    #[test]
    fn test_slug_disabled_suffix_and_no_version() {
        assert_eq!(slug_from_filename("sodium-fabric-0.5.3.jar.disabled"), "sodium");
        assert_eq!(slug_from_filename("worldedit.jar"), "worldedit");
    }

    fn archive_with_manifest(dir: &tempfile::TempDir, name: &str, manifest: &str) -> LocalArchive {
        let path = Utf8PathBuf::from_path_buf(dir.path().join(name)).unwrap();
        let mut writer = ZipWriter::new(File::create(&path).unwrap());
        writer
            .start_file("fabric.mod.json", FileOptions::default())
            .unwrap();
        writer.write_all(manifest.as_bytes()).unwrap();
        writer.finish().unwrap();
        LocalArchive::new(name, path)
    }

    fn plain_archive(dir: &tempfile::TempDir, name: &str) -> LocalArchive {
        let path = Utf8PathBuf::from_path_buf(dir.path().join(name)).unwrap();
        std::fs::write(&path, b"not a zip").unwrap();
        LocalArchive::new(name, path)
    }

    fn overrides() -> IndexMap<String, String> {
        IndexMap::from([("voicechat".to_string(), "simple-voice-chat".to_string())])
    }

    #[test]
    fn test_manifest_identity_wins_over_filename() {
        let dir = tempfile::tempdir().unwrap();
        // Filename would derive "sodium"; the manifest disagrees and wins
        let archive = archive_with_manifest(
            &dir,
            "sodium-fabric-0.5.3.jar",
            r#"{ "id": "actually-lithium" }"#,
        );

        let client = Arc::new(RegistryClient::new().unwrap());
        let resolver = IdentityResolver::new(client, IndexMap::new());
        assert_eq!(resolver.candidate_identity(&archive), "actually-lithium");
    }

    #[test]
    fn test_override_applies_to_filename_candidate() {
        let dir = tempfile::tempdir().unwrap();
        let archive = plain_archive(&dir, "voicechat-fabric-1.20.1-2.5.0.jar");

        let client = Arc::new(RegistryClient::new().unwrap());
        let resolver = IdentityResolver::new(client, overrides());
        assert_eq!(resolver.candidate_identity(&archive), "simple-voice-chat");
    }

    #[tokio::test]
    async fn test_resolve_confirms_via_direct_lookup() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/project/sodium"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "slug": "sodium",
                "title": "Sodium"
            })))
            .mount(&mock_server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let archive = plain_archive(&dir, "sodium-fabric-0.5.3.jar");

        let client = Arc::new(RegistryClient::with_base_url(mock_server.uri()).unwrap());
        let resolver = IdentityResolver::new(client, IndexMap::new());

        let project = resolver.resolve(&archive).await.unwrap();
        assert_eq!(project.slug, "sodium");
    }

    #[tokio::test]
    async fn test_resolve_falls_back_to_search() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/project/mapmod"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "hits": [ { "slug": "map-mod", "title": "Map Mod" } ],
                "total_hits": 1
            })))
            .mount(&mock_server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let archive = plain_archive(&dir, "mapmod-1.2.jar");

        let client = Arc::new(RegistryClient::with_base_url(mock_server.uri()).unwrap());
        let resolver = IdentityResolver::new(client, IndexMap::new());

        let project = resolver.resolve(&archive).await.unwrap();
        assert_eq!(project.slug, "map-mod");
    }

    #[tokio::test]
    async fn test_resolve_absent_when_both_fail() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/project/mystery"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "hits": [],
                "total_hits": 0
            })))
            .mount(&mock_server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let archive = plain_archive(&dir, "mystery-9.9.jar");

        let client = Arc::new(RegistryClient::with_base_url(mock_server.uri()).unwrap());
        let resolver = IdentityResolver::new(client, IndexMap::new());

        assert!(resolver.resolve(&archive).await.is_none());
    }
}
