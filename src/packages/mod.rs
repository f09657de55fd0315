//! npm package installation.
//!
//! Components declare the npm packages they import. This module picks the
//! project's package manager ([`PackageManagerDetector`]), maps an install
//! request to its command line ([`PackageManager::install_args`]), and
//! runs it ([`PackageInstaller`]).

pub mod detect;
pub mod installer;
pub mod manager;

pub use detect::PackageManagerDetector;
pub use installer::PackageInstaller;
pub use manager::PackageManager;
