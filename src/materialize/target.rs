//! Target path computation.
//!
//! Every component file lands directly in the target directory under its
//! base name. File identifiers come from the registry and are untrusted:
//! absolute paths, `..` segments, and empty names are rejected.

use std::path::{Component, Path, PathBuf};

use crate::error::{Result, SprigError};

/// Compute where `file_id` should be written inside `target_dir`.
///
/// # Errors
///
/// Returns `UnsafePath` if the identifier is absolute, contains `..`, or
/// has no usable file name.
pub fn target_path(target_dir: &Path, file_id: &str) -> Result<PathBuf> {
    let unsafe_path = || SprigError::UnsafePath {
        path: file_id.to_string(),
    };

    let normalized = file_id.replace('\\', "/");
    if normalized.trim().is_empty() || normalized.starts_with('/') {
        return Err(unsafe_path());
    }

    let id_path = Path::new(&normalized);
    let mut file_name = None;
    for component in id_path.components() {
        match component {
            Component::Normal(name) => file_name = Some(name),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(unsafe_path());
            }
        }
    }

    let file_name = file_name.ok_or_else(unsafe_path)?;
    let target = target_dir.join(file_name);

    if target.parent() != Some(target_dir) {
        return Err(unsafe_path());
    }

    Ok(target)
}
