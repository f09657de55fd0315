//! Project configuration for Sprig.
//!
//! This module handles the `sprig.json` file:
//! - Schema definitions in [`schema`]
//! - Loading and saving in [`loader`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use sprig::config::{load_config, save_config, ComponentsConfig};
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! save_config(temp.path(), &ComponentsConfig::default()).unwrap();
//!
//! let config = load_config(temp.path()).unwrap();
//! assert_eq!(config.components_dir, "components/ui");
//! ```

pub mod loader;
pub mod schema;
pub mod validator;

// Schema re-exports
pub use schema::{Aliases, ComponentsConfig, RegistryConfig};

// Loader re-exports
pub use loader::{
    config_exists, config_path, find_project_root, load_config, parse_config, save_config,
    CONFIG_FILE_NAME,
};

// Validator re-exports
pub use validator::{validate, validate_config, ValidationError};

/// JSON schema for `sprig.json`, pretty-printed.
pub fn json_schema() -> String {
    let schema = schemars::schema_for!(ComponentsConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_schema_describes_config_fields() {
        let schema = json_schema();
        assert!(schema.contains("componentsDir"));
        assert!(schema.contains("aliases"));
        assert!(schema.contains("packageManager"));
    }
}
