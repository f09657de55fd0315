//! Sprig - copy UI components from a registry into your project.
//!
//! Sprig reads a component registry, resolves the components you ask for
//! together with everything they depend on, installs their npm packages,
//! and writes their source files into your project with import paths
//! rewritten to your own aliases.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - `sprig.json` loading, saving, and validation
//! - [`error`] - Error types and result aliases
//! - [`install`] - The install run and its report
//! - [`materialize`] - Writing component files into the project
//! - [`packages`] - Package manager detection and invocation
//! - [`registry`] - Registry index model and sources
//! - [`resolver`] - Dependency closure over the registry
//! - [`shell`] - Process execution and interrupt handling
//! - [`ui`] - Interactive prompts, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use sprig::registry::{ComponentEntry, MemoryRegistry, RegistrySource};
//! use sprig::resolver::resolve;
//!
//! let registry = MemoryRegistry::new()
//!     .with_component(ComponentEntry {
//!         name: "button".to_string(),
//!         dependencies: ["clsx".to_string()].into(),
//!         ..Default::default()
//!     })
//!     .with_component(ComponentEntry {
//!         name: "dialog".to_string(),
//!         registry_dependencies: ["button".to_string()].into(),
//!         ..Default::default()
//!     });
//!
//! let index = registry.fetch_index().unwrap();
//! let result = resolve(&["dialog".to_string()], &index).unwrap();
//! assert_eq!(result.components, vec!["dialog", "button"]);
//! assert!(result.dependencies.contains("clsx"));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod install;
pub mod materialize;
pub mod packages;
pub mod registry;
pub mod resolver;
pub mod shell;
pub mod ui;

pub use error::{Result, SprigError};
