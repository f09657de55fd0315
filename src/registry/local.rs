//! Registries checked out on disk.
//!
//! A local registry directory uses the served layout: `registry.json` at the
//! root and artifacts under `components/`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SprigError};

use super::{RegistryIndex, RegistrySource};

/// A registry read from a local directory.
#[derive(Debug, Clone)]
pub struct LocalRegistry {
    root: PathBuf,
}

impl LocalRegistry {
    /// Create a registry rooted at `root`.
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    /// The registry root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read(&self, resource: &str, path: &Path) -> Result<String> {
        tracing::debug!("Reading {} from {}", resource, path.display());
        fs::read_to_string(path).map_err(|e| SprigError::RegistryUnavailable {
            resource: resource.to_string(),
            reason: format!("{}: {}", path.display(), e),
        })
    }
}

impl RegistrySource for LocalRegistry {
    fn fetch_index(&self) -> Result<RegistryIndex> {
        let content = self.read("registry.json", &self.root.join("registry.json"))?;
        RegistryIndex::from_json(&content)
    }

    fn fetch_artifact(&self, file_id: &str) -> Result<String> {
        let path = self
            .root
            .join("components")
            .join(file_id.trim_start_matches('/'));
        self.read(file_id, &path)
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn registry_dir() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("registry.json"),
            r#"{"button": {"type": "components:ui", "files": ["ui/button.tsx"]}}"#,
        )
        .unwrap();
        fs::create_dir_all(temp.path().join("components/ui")).unwrap();
        fs::write(
            temp.path().join("components/ui/button.tsx"),
            "export function Button() {}\n",
        )
        .unwrap();
        temp
    }

    #[test]
    fn reads_index() {
        let temp = registry_dir();
        let index = LocalRegistry::new(temp.path()).fetch_index().unwrap();
        assert!(index.contains("button"));
    }

    #[test]
    fn reads_artifact() {
        let temp = registry_dir();
        let source = LocalRegistry::new(temp.path())
            .fetch_artifact("ui/button.tsx")
            .unwrap();
        assert_eq!(source, "export function Button() {}\n");
    }

    #[test]
    fn missing_index_is_registry_unavailable() {
        let temp = TempDir::new().unwrap();
        let err = LocalRegistry::new(temp.path()).fetch_index().unwrap_err();
        assert!(matches!(err, SprigError::RegistryUnavailable { .. }));
    }

    #[test]
    fn missing_artifact_names_file() {
        let temp = registry_dir();
        let err = LocalRegistry::new(temp.path())
            .fetch_artifact("ui/missing.tsx")
            .unwrap_err();
        assert!(err.to_string().contains("ui/missing.tsx"));
    }
}
