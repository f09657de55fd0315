//! Atomic file writes.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SprigError};

/// Write `content` to `path` in one step.
///
/// The parent directory is created if needed. Content goes to a temporary
/// sibling first and is renamed into place, so readers see either the old
/// file or the complete new one, never a truncated file.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let failure = |path: &Path, e: std::io::Error| SprigError::FileWriteFailure {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).map_err(|e| failure(parent, e))?;

    let temp_path = temp_path_for(path);
    if let Err(e) = fs::write(&temp_path, content) {
        fs::remove_file(&temp_path).ok();
        return Err(failure(path, e));
    }

    if let Err(e) = fs::rename(&temp_path, path) {
        fs::remove_file(&temp_path).ok();
        return Err(failure(path, e));
    }

    tracing::debug!("Wrote {}", path.display());
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.sprig-tmp", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn creates_parent_directories() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("components/ui/button.tsx");

        write_atomic(&path, "export {}\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "export {}\n");
    }

    #[test]
    fn replaces_existing_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("button.tsx");
        fs::write(&path, "old content that is longer than the new one").unwrap();

        write_atomic(&path, "new").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn leaves_no_temp_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("card.tsx");

        write_atomic(&path, "x").unwrap();

        let names: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("card.tsx")]);
    }

    #[test]
    fn failure_names_path() {
        let temp = TempDir::new().unwrap();
        // A file where a directory is expected.
        let blocker = temp.path().join("components");
        fs::write(&blocker, "").unwrap();
        let path = blocker.join("button.tsx");

        let err = write_atomic(&path, "x").unwrap_err();

        assert!(matches!(err, SprigError::FileWriteFailure { .. }));
        assert!(err.to_string().contains("components"));
    }
}
