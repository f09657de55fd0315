//! Component registry access.
//!
//! This module handles loading the registry index and component artifacts
//! from one of several sources:
//! - HTTP registries with a single fallback mirror ([`RegistryClient`])
//! - Registry directories on disk ([`LocalRegistry`])
//! - In-memory registries for tests ([`MemoryRegistry`])
//!
//! All of them implement [`RegistrySource`].
//!
//! # Example
//!
//! ```
//! use sprig::registry::RegistryIndex;
//!
//! let index = RegistryIndex::from_json(
//!     r#"{"button": {"type": "components:ui", "files": ["ui/button.tsx"]}}"#,
//! )
//! .unwrap();
//!
//! assert!(index.get("button").unwrap().is_ui());
//! ```

pub mod client;
pub mod endpoint;
pub mod fetch;
pub mod index;
pub mod local;
pub mod memory;
pub mod source;

use std::path::Path;

use crate::config::RegistryConfig;
use crate::error::Result;

// Re-exports
pub use client::RegistryClient;
pub use endpoint::{RegistryEndpoint, DEFAULT_MIRROR_URL, DEFAULT_REGISTRY_URL};
pub use fetch::HttpFetcher;
pub use index::{ComponentEntry, ComponentKind, RegistryIndex, TailwindMeta};
pub use local::LocalRegistry;
pub use memory::MemoryRegistry;
pub use source::RegistrySource;

/// Pick the registry source for a run.
///
/// Precedence:
/// 1. An explicit location (`--registry` / `SPRIG_REGISTRY`): an http(s) URL
///    is used as the only endpoint, anything else as a local directory
///    relative to `project_root`
/// 2. The `registry` block of the project config
/// 3. The default public registry and its mirror
pub fn open_source(
    explicit: Option<&str>,
    config: Option<&RegistryConfig>,
    project_root: &Path,
) -> Result<Box<dyn RegistrySource>> {
    if let Some(location) = explicit {
        if is_http_url(location) {
            tracing::debug!("Using registry {}", location);
            return Ok(Box::new(RegistryClient::new(
                HttpFetcher::new()?,
                RegistryEndpoint::served(location),
                None,
            )));
        }
        let root = project_root.join(location);
        tracing::debug!("Using local registry at {}", root.display());
        return Ok(Box::new(LocalRegistry::new(&root)));
    }

    if let Some(registry) = config {
        return Ok(Box::new(RegistryClient::new(
            HttpFetcher::new()?,
            RegistryEndpoint::served(&registry.url),
            registry
                .fallback_url
                .as_deref()
                .map(RegistryEndpoint::mirror),
        )));
    }

    Ok(Box::new(RegistryClient::default_registry()?))
}

/// Whether a location looks like an http(s) URL.
pub fn is_http_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_url_is_http() {
        let temp = TempDir::new().unwrap();
        let source = open_source(Some("https://ui.example.com"), None, temp.path()).unwrap();
        assert_eq!(source.describe(), "https://ui.example.com");
    }

    #[test]
    fn explicit_path_is_local_and_relative_to_project() {
        let temp = TempDir::new().unwrap();
        let source = open_source(Some("vendor/registry"), None, temp.path()).unwrap();
        assert_eq!(
            source.describe(),
            temp.path().join("vendor/registry").display().to_string()
        );
    }

    #[test]
    fn config_registry_is_used_without_explicit() {
        let temp = TempDir::new().unwrap();
        let config = RegistryConfig {
            url: "https://ui.internal.dev".to_string(),
            fallback_url: None,
        };
        let source = open_source(None, Some(&config), temp.path()).unwrap();
        assert_eq!(source.describe(), "https://ui.internal.dev");
    }

    #[test]
    fn default_registry_when_nothing_configured() {
        let temp = TempDir::new().unwrap();
        let source = open_source(None, None, temp.path()).unwrap();
        assert_eq!(source.describe(), DEFAULT_REGISTRY_URL);
    }

    #[test]
    fn http_url_detection() {
        assert!(is_http_url("http://localhost:8080"));
        assert!(is_http_url("https://ui.example.com"));
        assert!(!is_http_url("./registry"));
        assert!(!is_http_url("ftp://example.com"));
    }
}
