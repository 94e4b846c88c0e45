//! Atomic file replacement for saved documents.
//!
//! Writes go to a temporary sibling file (`.{filename}.tmp`), are synced to
//! disk, then renamed over the target. A reader never observes a partially
//! written document, and a failed write leaves the previous file in place.
//!
//! Source and destination must be on the same filesystem for the rename to
//! be atomic, which holds because the temporary file shares the target's
//! directory. After a crash a stale `.{filename}.tmp` may remain.

use crate::error::{ConfigError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically replace `path` with `content`, creating parent directories.
///
/// ```no_run
/// use cfgtree::fs::atomic_write;
///
/// atomic_write("settings.yaml", b"key: value\n")?;
/// # Ok::<(), cfgtree::error::ConfigError>(())
/// ```
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            ConfigError::io(
                format!("failed to create parent directory '{}'", parent.display()),
                e,
            )
        })?;
    }

    let temp_path = temp_path_for(path)?;
    write_and_sync(&temp_path, content)?;
    replace(&temp_path, path)?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "atomically replaced file");
    Ok(())
}

fn temp_path_for(target: &Path) -> Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ConfigError::UserError(format!("invalid file path '{}'", target.display())))?;

    Ok(parent.join(format!(".{}.tmp", filename)))
}

fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|e| {
        ConfigError::io(format!("failed to create temporary file '{}'", path.display()), e)
    })?;

    let written = file.write_all(content).and_then(|()| file.sync_all());
    if let Err(e) = written {
        drop(file);
        let _ = fs::remove_file(path);
        return Err(ConfigError::io(
            format!("failed to write temporary file '{}'", path.display()),
            e,
        ));
    }
    Ok(())
}

/// Rename `source` over `target`; `rename` replaces an existing target on
/// every supported platform.
fn replace(source: &Path, target: &Path) -> Result<()> {
    if let Err(e) = fs::rename(source, target) {
        let _ = fs::remove_file(source);
        return Err(ConfigError::io(
            format!("failed to replace '{}'", target.display()),
            e,
        ));
    }

    // Persist the directory entry as well; opening a directory fails on
    // Windows and is skipped there.
    if let Some(parent) = target.parent()
        && let Ok(dir) = File::open(parent)
    {
        let _ = dir.sync_all();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write_new_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("settings.json");

        atomic_write(&file_path, b"{}\n").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "{}\n");
    }

    #[test]
    fn test_atomic_write_replaces_existing() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("settings.yaml");
        fs::write(&file_path, "old: true\n").unwrap();

        atomic_write(&file_path, b"new: true\n").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "new: true\n");
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("nested").join("dirs").join("app.yml");

        atomic_write(&file_path, b"a: 1\n").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "a: 1\n");
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("app.json");

        atomic_write(&file_path, b"[]").unwrap();

        assert!(!temp_dir.path().join(".app.json.tmp").exists());
    }

    #[test]
    fn test_failed_replace_keeps_target_and_cleans_up() {
        let temp_dir = TempDir::new().unwrap();
        // A non-empty directory cannot be replaced by a file.
        let target = temp_dir.path().join("occupied");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep.txt"), "kept").unwrap();

        let err = atomic_write(&target, b"data").unwrap_err();

        assert!(matches!(err, ConfigError::Io { .. }));
        assert_eq!(fs::read_to_string(target.join("keep.txt")).unwrap(), "kept");
        assert!(!temp_dir.path().join(".occupied.tmp").exists());
    }

    #[test]
    fn test_temp_path_is_hidden_sibling() {
        let temp = temp_path_for(Path::new("/some/path/file.yaml")).unwrap();
        assert_eq!(temp, Path::new("/some/path/.file.yaml.tmp"));
    }
}
