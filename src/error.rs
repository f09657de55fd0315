//! Error types for Sprig operations.
//!
//! This module defines [`SprigError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Errors raised before any filesystem or package-manager side effect
//!   (see [`SprigError::is_pre_mutation`]) abort the whole run
//! - Per-component errors are recorded in the install report and the run
//!   continues with the next component
//! - Use `anyhow::Error` (via `SprigError::Other`) for unexpected errors
//! - Every error names the component, file, or package manager involved

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for Sprig operations.
#[derive(Debug, Error)]
pub enum SprigError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Neither the primary nor the fallback registry could serve a resource.
    #[error("Registry unavailable for '{resource}': {reason}")]
    RegistryUnavailable { resource: String, reason: String },

    /// A requested or depended-upon component is not in the registry.
    #[error("Unknown component: {name}")]
    UnknownComponent { name: String },

    /// The component graph contains a cycle.
    #[error("Circular dependency detected: {cycle}")]
    CyclicDependency { cycle: String },

    /// A component file would be written outside its target directory.
    #[error("Unsafe path '{path}' escapes the target directory")]
    UnsafePath { path: String },

    /// The package manager ran but did not succeed.
    #[error("{manager} failed to install packages: {message}")]
    PackageManagerFailure { manager: String, message: String },

    /// A component file could not be written.
    #[error("Failed to write {path}: {message}")]
    FileWriteFailure { path: PathBuf, message: String },

    /// The detected or requested package manager is not supported.
    #[error("Unknown package manager '{name}' (expected one of: npm, pnpm, yarn, bun)")]
    UnknownPackageManager { name: String },

    /// The user interrupted the run before anything was written.
    #[error("Interrupted")]
    Interrupted,

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SprigError {
    /// Whether this error can only occur before any side effect has happened.
    ///
    /// These errors abort the whole run; there is nothing to roll back.
    pub fn is_pre_mutation(&self) -> bool {
        matches!(
            self,
            Self::ConfigNotFound { .. }
                | Self::ConfigParseError { .. }
                | Self::ConfigValidationError { .. }
                | Self::UnknownComponent { .. }
                | Self::CyclicDependency { .. }
                | Self::Interrupted
        )
    }
}

/// Result type alias for Sprig operations.
pub type Result<T> = std::result::Result<T, SprigError>;
