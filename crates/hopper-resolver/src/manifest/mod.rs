//! Embedded loader-manifest extraction from mod jars.
//!
//! A jar may carry a `fabric.mod.json` (or `quilt.mod.json`) describing the
//! mod; its explicit Modrinth field, or failing that its internal mod id, is
//! the strongest identity signal available. Anything that goes wrong while
//! reading (not a zip, no manifest entry, malformed JSON) is treated as
//! "no embedded identity", never as an error.

use std::fs::File;
use std::io::Read;

use camino::Utf8Path;
use serde::Deserialize;
use tracing::debug;
use zip::ZipArchive;

use hopper_core::error::HopperError;

/// Identity-relevant subset of a Fabric mod manifest
#[derive(Debug, Clone, Deserialize)]
pub struct ModManifest {
    /// Internal mod id
    pub id: Option<String>,
    /// Free-form custom block; may name the Modrinth project explicitly
    #[serde(default)]
    pub custom: CustomSection,
}

/// `custom` block of a Fabric manifest
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomSection {
    /// Explicit Modrinth project slug/id
    pub modrinth: Option<String>,
}

/// Quilt manifests nest the id one level deeper
#[derive(Debug, Clone, Deserialize)]
struct QuiltManifest {
    quilt_loader: QuiltLoaderSection,
}

#[derive(Debug, Clone, Deserialize)]
struct QuiltLoaderSection {
    id: Option<String>,
}

impl ModManifest {
    /// Preferred registry identity: the explicit Modrinth field wins over
    /// the internal mod id.
    pub fn registry_identity(&self) -> Option<&str> {
        self.custom
            .modrinth
            .as_deref()
            .or(self.id.as_deref())
            .filter(|id| !id.is_empty())
    }
}

/// Read the embedded manifest from a jar, trying the Fabric entry first and
/// the Quilt entry second. Read failures degrade to absence.
pub fn read_manifest(path: &Utf8Path) -> Option<ModManifest> {
    match try_read_manifest(path) {
        Ok(manifest) => manifest,
        Err(e) => {
            debug!(path = %path, error = %e, "manifest unreadable, treating as absent");
            None
        }
    }
}

/// Typed read: unreadable or malformed archives are `ArchiveRead` errors; a
/// readable jar with no manifest entry is `Ok(None)`.
fn try_read_manifest(path: &Utf8Path) -> Result<Option<ModManifest>, HopperError> {
    let archive_error = |message: String| HopperError::ArchiveRead {
        filename: path.file_name().unwrap_or(path.as_str()).to_string(),
        message,
    };

    let file = File::open(path).map_err(|e| archive_error(e.to_string()))?;
    let mut archive = ZipArchive::new(file).map_err(|e| archive_error(e.to_string()))?;

    if let Some(raw) = read_entry(&mut archive, "fabric.mod.json") {
        return serde_json::from_str::<ModManifest>(&raw)
            .map(Some)
            .map_err(|e| archive_error(format!("malformed fabric.mod.json: {}", e)));
    }

    if let Some(raw) = read_entry(&mut archive, "quilt.mod.json") {
        return serde_json::from_str::<QuiltManifest>(&raw)
            .map(|quilt| {
                Some(ModManifest {
                    id: quilt.quilt_loader.id,
                    custom: CustomSection::default(),
                })
            })
            .map_err(|e| archive_error(format!("malformed quilt.mod.json: {}", e)));
    }

    Ok(None)
}

/// Read a single named entry from the archive as UTF-8 text
fn read_entry(archive: &mut ZipArchive<File>, name: &str) -> Option<String> {
    let mut entry = archive.by_name(name).ok()?;
    let mut raw = String::new();
    entry.read_to_string(&mut raw).ok()?;
    Some(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use camino::Utf8PathBuf;
    use zip::write::FileOptions;
    use zip::ZipWriter;

    fn write_jar(dir: &Utf8Path, name: &str, entries: &[(&str, &str)]) -> Utf8PathBuf {
        let path = dir.join(name);
        let file = File::create(&path).unwrap();
        let mut writer = ZipWriter::new(file);
        for (entry_name, content) in entries {
            writer
                .start_file(*entry_name, FileOptions::default())
                .unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
        path
    }

    fn temp_dir() -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        (dir, path)
    }

    #[test]
    fn test_fabric_manifest_with_modrinth_field() {
        let (_guard, dir) = temp_dir();
        let jar = write_jar(
            &dir,
            "voice.jar",
            &[(
                "fabric.mod.json",
                r#"{ "id": "voicechat", "custom": { "modrinth": "simple-voice-chat" } }"#,
            )],
        );

        let manifest = read_manifest(&jar).unwrap();
        assert_eq!(manifest.registry_identity(), Some("simple-voice-chat"));
    }

    #[test]
    fn test_fabric_manifest_id_fallback() {
        let (_guard, dir) = temp_dir();
        let jar = write_jar(
            &dir,
            "sodium.jar",
            &[("fabric.mod.json", r#"{ "id": "sodium" }"#)],
        );

        let manifest = read_manifest(&jar).unwrap();
        assert_eq!(manifest.registry_identity(), Some("sodium"));
    }

    #[test]
    fn test_quilt_manifest() {
        let (_guard, dir) = temp_dir();
        let jar = write_jar(
            &dir,
            "ok_zoomer.jar",
            &[(
                "quilt.mod.json",
                r#"{ "quilt_loader": { "id": "ok_zoomer" } }"#,
            )],
        );

        let manifest = read_manifest(&jar).unwrap();
        assert_eq!(manifest.registry_identity(), Some("ok_zoomer"));
    }

    #[test]
    fn test_malformed_manifest_is_absence() {
        let (_guard, dir) = temp_dir();
        let jar = write_jar(&dir, "broken.jar", &[("fabric.mod.json", "{ not json")]);

        assert!(read_manifest(&jar).is_none());
    }

    #[test]
    fn test_missing_entry_is_absence() {
        let (_guard, dir) = temp_dir();
        let jar = write_jar(&dir, "plain.jar", &[("other.txt", "hello")]);

        assert!(read_manifest(&jar).is_none());
    }

    #[test]
    fn test_non_zip_file_is_absence() {
        let (_guard, dir) = temp_dir();
        let path = dir.join("not-a-jar.jar");
        std::fs::write(&path, b"just bytes").unwrap();

        assert!(read_manifest(&path).is_none());
    }

    #[test]
    fn test_unreadable_archive_is_typed_internally() {
        let (_guard, dir) = temp_dir();
        let path = dir.join("not-a-jar.jar");
        std::fs::write(&path, b"just bytes").unwrap();

        let err = try_read_manifest(&path).unwrap_err();
        match err {
            HopperError::ArchiveRead { filename, .. } => assert_eq!(filename, "not-a-jar.jar"),
            other => panic!("Expected ArchiveRead, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_is_absence() {
        let (_guard, dir) = temp_dir();
        assert!(read_manifest(&dir.join("ghost.jar")).is_none());
    }
}
