//! Backup of the mods directory before a live update.
//!
//! The previous file set is copied into a fresh `old mods` directory (with a
//! `-N` suffix when earlier backups exist), and the jars are then removed
//! from the live directory. Identification reads from the backup snapshot,
//! so the live directory only ever receives freshly downloaded files.

use camino::{Utf8Path, Utf8PathBuf};
use walkdir::WalkDir;

use hopper_core::error::{HopperError, HopperResult};

/// Base name for backup directories, created under the backup parent
const BACKUP_BASE: &str = "old mods";

/// Copy the mods directory into a fresh backup directory under `parent`,
/// then remove the jars from the live directory. Returns the backup path.
pub fn backup_and_clear(mods_dir: &Utf8Path, parent: &Utf8Path) -> HopperResult<Utf8PathBuf> {
    let backup_dir = next_backup_dir(parent);

    copy_tree(mods_dir, &backup_dir)?;

    for entry in mods_dir
        .read_dir_utf8()
        .map_err(|e| HopperError::io(format!("Failed to read {}", mods_dir), e))?
    {
        let entry = entry.map_err(|e| HopperError::io("Failed to read directory entry".to_string(), e))?;
        let path = entry.path();
        if path.extension() == Some("jar") {
            std::fs::remove_file(path)
                .map_err(|e| HopperError::io(format!("Failed to remove {}", path), e))?;
        }
    }

    Ok(backup_dir)
}

/// First unused of `old mods`, `old mods-1`, `old mods-2`, ...
fn next_backup_dir(parent: &Utf8Path) -> Utf8PathBuf {
    let base = parent.join(BACKUP_BASE);
    if !base.exists() {
        return base;
    }
    let mut n = 1;
    loop {
        let candidate = parent.join(format!("{}-{}", BACKUP_BASE, n));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

/// Recursive copy preserving the directory layout
fn copy_tree(from: &Utf8Path, to: &Utf8Path) -> HopperResult<()> {
    for entry in WalkDir::new(from) {
        let entry = entry.map_err(|e| HopperError::Io {
            message: format!("Failed to walk {}", from),
            source: e.into(),
        })?;

        let Ok(relative) = entry.path().strip_prefix(from) else {
            continue;
        };
        let dest = to.as_std_path().join(relative);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&dest)
                .map_err(|e| HopperError::io(format!("Failed to create {}", dest.display()), e))?;
        } else {
            std::fs::copy(entry.path(), &dest).map_err(|e| {
                HopperError::io(format!("Failed to copy {}", entry.path().display()), e)
            })?;
        }
    }
    Ok(())
}
