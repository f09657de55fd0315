//! Configuration file loading and saving.
//!
//! The project configuration lives in `sprig.json` at the project root.

use crate::config::schema::ComponentsConfig;
use crate::config::validator::validate;
use crate::error::{Result, SprigError};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the project configuration file.
pub const CONFIG_FILE_NAME: &str = "sprig.json";

/// Path to the config file for a project root.
pub fn config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_FILE_NAME)
}

/// Check if a project has been initialized.
pub fn config_exists(project_root: &Path) -> bool {
    config_path(project_root).is_file()
}

/// Find the project root by walking up from `start`.
///
/// Looks for:
/// 1. `sprig.json` (primary indicator)
/// 2. `package.json` (fallback)
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if current.join(CONFIG_FILE_NAME).is_file() {
            return Some(current);
        }

        if current.join("package.json").is_file() {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load and validate the project configuration.
///
/// # Errors
///
/// Returns `ConfigNotFound` if `sprig.json` doesn't exist.
/// Returns `ConfigParseError` if the JSON is invalid or has unknown keys.
/// Returns `ConfigValidationError` if a field has an invalid value.
pub fn load_config(project_root: &Path) -> Result<ComponentsConfig> {
    let path = config_path(project_root);
    let content = fs::read_to_string(&path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SprigError::ConfigNotFound { path: path.clone() }
        } else {
            SprigError::Io(e)
        }
    })?;

    let config = parse_config(&content, &path)?;
    validate(&config)?;

    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Parse JSON content into a [`ComponentsConfig`].
///
/// # Arguments
///
/// * `content` - The JSON content to parse
/// * `source_path` - Path for error reporting
pub fn parse_config(content: &str, source_path: &Path) -> Result<ComponentsConfig> {
    serde_json::from_str(content).map_err(|e| SprigError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Write the project configuration.
///
/// Uses the write-to-temp-then-rename pattern to prevent corruption.
pub fn save_config(project_root: &Path, config: &ComponentsConfig) -> Result<PathBuf> {
    validate(config)?;

    let path = config_path(project_root);
    let mut content = serde_json::to_string_pretty(config).map_err(|e| {
        SprigError::ConfigValidationError {
            message: format!("Failed to serialize config: {}", e),
        }
    })?;
    content.push('\n');

    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, &content)?;
    fs::rename(&temp_path, &path)?;

    Ok(path)
}
