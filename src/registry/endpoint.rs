//! Registry endpoint layouts.
//!
//! A registry is served from a base URL. The primary registry serves the
//! index at `{base}/registry.json` and artifacts at `{base}/components/{file}`.
//! The raw-content mirror keeps the repository layout instead:
//! `{base}/registry/registry.json` and `{base}/packages/components/{file}`.

/// Default primary registry.
pub const DEFAULT_REGISTRY_URL: &str = "https://ui.sprig.dev";

/// Default fallback mirror (raw repository content).
pub const DEFAULT_MIRROR_URL: &str = "https://raw.githubusercontent.com/sprig-ui/sprig/main";

/// Where a registry serves its index and artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEndpoint {
    base_url: String,
    index_path: &'static str,
    artifact_dir: &'static str,
}

impl RegistryEndpoint {
    /// A registry using the served layout.
    pub fn served(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            index_path: "registry.json",
            artifact_dir: "components",
        }
    }

    /// A registry using the raw repository layout.
    pub fn mirror(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            index_path: "registry/registry.json",
            artifact_dir: "packages/components",
        }
    }

    /// The base URL, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the registry index.
    pub fn index_url(&self) -> String {
        format!("{}/{}", self.base_url, self.index_path)
    }

    /// URL of a component artifact.
    pub fn artifact_url(&self, file_id: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url,
            self.artifact_dir,
            file_id.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn served_layout_urls() {
        let endpoint = RegistryEndpoint::served("https://ui.example.com/");
        assert_eq!(endpoint.base_url(), "https://ui.example.com");
        assert_eq!(endpoint.index_url(), "https://ui.example.com/registry.json");
        assert_eq!(
            endpoint.artifact_url("ui/button.tsx"),
            "https://ui.example.com/components/ui/button.tsx"
        );
    }

    #[test]
    fn mirror_layout_urls() {
        let endpoint = RegistryEndpoint::mirror("https://raw.example.com/org/repo/main");
        assert_eq!(
            endpoint.index_url(),
            "https://raw.example.com/org/repo/main/registry/registry.json"
        );
        assert_eq!(
            endpoint.artifact_url("/ui/button.tsx"),
            "https://raw.example.com/org/repo/main/packages/components/ui/button.tsx"
        );
    }
}
