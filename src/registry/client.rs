//! HTTP registry client with a single fallback.
//!
//! Every fetch is a bounded two-attempt strategy: the primary endpoint, then
//! (if configured) exactly one fallback endpoint. There is no backoff and no
//! further retry; registries are static content and expected to be up.

use crate::error::{Result, SprigError};

use super::endpoint::{RegistryEndpoint, DEFAULT_MIRROR_URL, DEFAULT_REGISTRY_URL};
use super::fetch::HttpFetcher;
use super::{RegistryIndex, RegistrySource};

/// Fetches the index and artifacts from an HTTP registry.
pub struct RegistryClient {
    fetcher: HttpFetcher,
    primary: RegistryEndpoint,
    fallback: Option<RegistryEndpoint>,
}

impl RegistryClient {
    /// Create a client for the given endpoints.
    pub fn new(
        fetcher: HttpFetcher,
        primary: RegistryEndpoint,
        fallback: Option<RegistryEndpoint>,
    ) -> Self {
        Self {
            fetcher,
            primary,
            fallback,
        }
    }

    /// Client for the default public registry and its raw mirror.
    pub fn default_registry() -> Result<Self> {
        Ok(Self::new(
            HttpFetcher::new()?,
            RegistryEndpoint::served(DEFAULT_REGISTRY_URL),
            Some(RegistryEndpoint::mirror(DEFAULT_MIRROR_URL)),
        ))
    }

    /// Run `attempt` against the primary endpoint, then the fallback.
    fn with_fallback<T>(
        &self,
        resource: &str,
        attempt: impl Fn(&RegistryEndpoint) -> anyhow::Result<T>,
    ) -> Result<T> {
        let primary_err = match attempt(&self.primary) {
            Ok(value) => return Ok(value),
            Err(e) => e,
        };

        let Some(fallback) = &self.fallback else {
            return Err(SprigError::RegistryUnavailable {
                resource: resource.to_string(),
                reason: primary_err.to_string(),
            });
        };

        tracing::warn!(
            "Primary registry failed for {} ({}); trying {}",
            resource,
            primary_err,
            fallback.base_url()
        );

        attempt(fallback).map_err(|fallback_err| SprigError::RegistryUnavailable {
            resource: resource.to_string(),
            reason: format!("primary: {}; fallback: {}", primary_err, fallback_err),
        })
    }
}

impl RegistrySource for RegistryClient {
    fn fetch_index(&self) -> Result<RegistryIndex> {
        self.with_fallback("registry.json", |endpoint| {
            let url = endpoint.index_url();
            tracing::debug!("Fetching registry index from {}", url);
            let body = self.fetcher.fetch(&url)?;
            Ok(RegistryIndex::from_json(&body)?)
        })
    }

    fn fetch_artifact(&self, file_id: &str) -> Result<String> {
        self.with_fallback(file_id, |endpoint| {
            let url = endpoint.artifact_url(file_id);
            tracing::debug!("Fetching {} from {}", file_id, url);
            self.fetcher.fetch(&url)
        })
    }

    fn describe(&self) -> String {
        self.primary.base_url().to_string()
    }
}
