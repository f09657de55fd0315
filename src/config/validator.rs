//! Configuration validation rules.
//!
//! This module validates configuration for correctness:
//! - `componentsDir` must be a relative path that stays inside the project
//! - Aliases must be non-empty and must not end with `/`
//! - Registry URLs must be http(s)

use std::path::{Component, Path};

use crate::config::schema::ComponentsConfig;
use crate::error::{Result, SprigError};

/// Validation error with context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field
    pub field: String,
    /// Human-readable error message
    pub message: String,
}

/// Validate a configuration and return all errors.
///
/// All problems are collected rather than stopping at the first one.
pub fn validate_config(config: &ComponentsConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    errors.extend(validate_components_dir(&config.components_dir));
    errors.extend(validate_aliases(config));
    errors.extend(validate_registry(config));

    errors
}

/// Validate and return an error listing every problem.
pub fn validate(config: &ComponentsConfig) -> Result<()> {
    let errors = validate_config(config);
    if errors.is_empty() {
        return Ok(());
    }

    let message = errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");

    Err(SprigError::ConfigValidationError { message })
}

fn validate_components_dir(dir: &str) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let path = Path::new(dir);

    if dir.trim().is_empty() {
        errors.push(ValidationError {
            field: "componentsDir".to_string(),
            message: "must not be empty".to_string(),
        });
    } else if path.is_absolute() {
        errors.push(ValidationError {
            field: "componentsDir".to_string(),
            message: format!("'{}' must be relative to the project root", dir),
        });
    } else if path.components().any(|c| matches!(c, Component::ParentDir)) {
        errors.push(ValidationError {
            field: "componentsDir".to_string(),
            message: format!("'{}' must not leave the project root", dir),
        });
    }

    errors
}

fn validate_aliases(config: &ComponentsConfig) -> Vec<ValidationError> {
    let aliases = &config.aliases;
    let fields = [
        ("aliases.components", Some(&aliases.components)),
        ("aliases.utils", Some(&aliases.utils)),
        ("aliases.ui", aliases.ui.as_ref()),
        ("aliases.lib", aliases.lib.as_ref()),
        ("aliases.hooks", aliases.hooks.as_ref()),
    ];

    let mut errors = Vec::new();
    for (field, value) in fields {
        let Some(value) = value else { continue };
        if value.trim().is_empty() {
            errors.push(ValidationError {
                field: field.to_string(),
                message: "must not be empty".to_string(),
            });
        } else if value.ends_with('/') {
            errors.push(ValidationError {
                field: field.to_string(),
                message: format!("'{}' must not end with '/'", value),
            });
        }
    }

    errors
}

fn validate_registry(config: &ComponentsConfig) -> Vec<ValidationError> {
    let Some(registry) = &config.registry else {
        return Vec::new();
    };

    let mut errors = Vec::new();
    let urls = [
        ("registry.url", Some(&registry.url)),
        ("registry.fallbackUrl", registry.fallback_url.as_ref()),
    ];

    for (field, url) in urls {
        let Some(url) = url else { continue };
        if !crate::registry::is_http_url(url) {
            errors.push(ValidationError {
                field: field.to_string(),
                message: format!("'{}' must be an http(s) URL", url),
            });
        }
    }

    errors
}
