//! Handle to a locally-installed mod archive.

use camino::Utf8PathBuf;

/// A jar found in the managed mods directory.
///
/// Enumerated once at startup and never mutated; the path points at the
/// readable snapshot the run identifies from (the backup directory in live
/// mode, the mods directory itself in dry-run).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalArchive {
    /// Bare filename, used as the report key when no identity is found
    pub filename: String,
    /// Full path to the readable archive
    pub path: Utf8PathBuf,
}

impl LocalArchive {
    /// Create a new archive handle
    pub fn new(filename: impl Into<String>, path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            filename: filename.into(),
            path: path.into(),
        }
    }
}
