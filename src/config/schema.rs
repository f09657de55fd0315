//! Configuration schema definitions for Sprig.
//!
//! This module contains the struct definitions that map to the
//! `sprig.json` project configuration file. Unknown keys are rejected when
//! the file is parsed, so a typo surfaces at load time instead of being
//! silently ignored.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Root configuration structure for `sprig.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ComponentsConfig {
    /// Editor schema reference (ignored by Sprig)
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Directory components are written to, relative to the project root
    #[serde(default = "default_components_dir")]
    pub components_dir: String,

    /// Import aliases used when rewriting component sources
    #[serde(default)]
    pub aliases: Aliases,

    /// Registry to install from (defaults to the public registry)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<RegistryConfig>,

    /// Package manager to use instead of detecting one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_manager: Option<String>,
}

impl Default for ComponentsConfig {
    fn default() -> Self {
        Self {
            schema: None,
            components_dir: default_components_dir(),
            aliases: Aliases::default(),
            registry: None,
            package_manager: None,
        }
    }
}

fn default_components_dir() -> String {
    "components/ui".to_string()
}

/// Import aliases for the consumer project.
///
/// Registry sources import from `@/registry/<group>/...`; each group is
/// rewritten to the matching alias here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Aliases {
    /// Alias for the components root (e.g. `@/components`)
    pub components: String,

    /// Alias for the `cn`/utility module (e.g. `@/lib/utils`)
    pub utils: String,

    /// Alias for UI components (defaults to `<components>/ui`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui: Option<String>,

    /// Alias for library modules (defaults to the parent of `utils`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lib: Option<String>,

    /// Alias for hooks (defaults to `<components root>/hooks`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hooks: Option<String>,
}

impl Default for Aliases {
    fn default() -> Self {
        Self {
            components: "@/components".to_string(),
            utils: "@/lib/utils".to_string(),
            ui: None,
            lib: None,
            hooks: None,
        }
    }
}

impl Aliases {
    /// Resolved alias for UI components.
    pub fn ui(&self) -> String {
        self.ui
            .clone()
            .unwrap_or_else(|| format!("{}/ui", self.components))
    }

    /// Resolved alias for library modules.
    pub fn lib(&self) -> String {
        self.lib.clone().unwrap_or_else(|| {
            self.utils
                .rsplit_once('/')
                .map(|(parent, _)| parent.to_string())
                .unwrap_or_else(|| self.utils.clone())
        })
    }

    /// Resolved alias for hooks.
    pub fn hooks(&self) -> String {
        self.hooks.clone().unwrap_or_else(|| {
            let root = self
                .components
                .rsplit_once('/')
                .map(|(parent, _)| parent)
                .unwrap_or("@");
            format!("{}/hooks", root)
        })
    }

    /// Alias for a registry import group, if the group is known.
    pub fn for_group(&self, group: &str) -> Option<String> {
        match group {
            "ui" => Some(self.ui()),
            "components" => Some(self.components.clone()),
            "lib" => Some(self.lib()),
            "hooks" => Some(self.hooks()),
            _ => None,
        }
    }
}

/// Registry endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RegistryConfig {
    /// Base URL serving `registry.json` and `components/`
    pub url: String,

    /// Raw mirror serving `registry/registry.json` and `packages/components/`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_config() {
        let config: ComponentsConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.components_dir, "components/ui");
        assert_eq!(config.aliases, Aliases::default());
        assert!(config.registry.is_none());
    }

    #[test]
    fn parses_full_config() {
        let json = r#"{
            "$schema": "https://ui.sprig.dev/schema.json",
            "componentsDir": "src/components/ui",
            "aliases": {
                "components": "~/components",
                "utils": "~/lib/utils",
                "hooks": "~/hooks"
            },
            "registry": {
                "url": "https://ui.internal.dev",
                "fallbackUrl": "https://mirror.internal.dev"
            },
            "packageManager": "pnpm"
        }"#;

        let config: ComponentsConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.components_dir, "src/components/ui");
        assert_eq!(config.aliases.components, "~/components");
        assert_eq!(
            config.registry.unwrap().fallback_url.as_deref(),
            Some("https://mirror.internal.dev")
        );
        assert_eq!(config.package_manager.as_deref(), Some("pnpm"));
    }

    #[test]
    fn rejects_unknown_keys() {
        let result: Result<ComponentsConfig, _> =
            serde_json::from_str(r#"{"componentDir": "src/ui"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_unknown_alias_keys() {
        let result: Result<ComponentsConfig, _> = serde_json::from_str(
            r#"{"aliases": {"components": "@/components", "utils": "@/lib/utils", "icons": "@/icons"}}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn derived_aliases() {
        let aliases = Aliases::default();
        assert_eq!(aliases.ui(), "@/components/ui");
        assert_eq!(aliases.lib(), "@/lib");
        assert_eq!(aliases.hooks(), "@/hooks");
    }

    #[test]
    fn explicit_aliases_win() {
        let aliases = Aliases {
            ui: Some("@/ui".to_string()),
            lib: Some("@/shared".to_string()),
            ..Aliases::default()
        };
        assert_eq!(aliases.ui(), "@/ui");
        assert_eq!(aliases.lib(), "@/shared");
    }

    #[test]
    fn unknown_group_has_no_alias() {
        assert_eq!(Aliases::default().for_group("blocks"), None);
        assert_eq!(
            Aliases::default().for_group("ui").as_deref(),
            Some("@/components/ui")
        );
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_string(&ComponentsConfig::default()).unwrap();
        assert!(json.contains("\"componentsDir\""));
        assert!(!json.contains("registry"));
    }
}
