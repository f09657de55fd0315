//! The registry source seam.

use crate::error::Result;

use super::RegistryIndex;

/// Somewhere components can be fetched from.
///
/// Implemented by [`RegistryClient`](super::RegistryClient) for HTTP
/// registries, [`LocalRegistry`](super::LocalRegistry) for a registry checked
/// out on disk, and [`MemoryRegistry`](super::MemoryRegistry) for tests.
pub trait RegistrySource {
    /// Fetch and parse the registry index.
    fn fetch_index(&self) -> Result<RegistryIndex>;

    /// Fetch the raw text of one component file.
    fn fetch_artifact(&self, file_id: &str) -> Result<String>;

    /// Human-readable location, for messages.
    fn describe(&self) -> String;
}
