//! HTTP registry fetching.
//!
//! Provides a thin blocking HTTP client used for both the registry index
//! and individual component artifacts.

use anyhow::{bail, Result};
use reqwest::blocking::Client;
use std::time::Duration;

/// Fetches registry resources over HTTP/HTTPS.
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Create a new HTTP fetcher with default 30-second timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(Self::DEFAULT_TIMEOUT)
    }

    /// Create a new HTTP fetcher with custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("sprig/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self { client, timeout })
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch a URL as text.
    ///
    /// Any non-2xx status is an error that mentions the status code.
    pub fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send()?;

        if !response.status().is_success() {
            bail!("HTTP {} fetching {}", response.status(), url);
        }

        Ok(response.text()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn default_timeout_is_30_seconds() {
        let fetcher = HttpFetcher::new().unwrap();
        assert_eq!(fetcher.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn custom_timeout() {
        let fetcher = HttpFetcher::with_timeout(Duration::from_secs(60)).unwrap();
        assert_eq!(fetcher.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn fetch_returns_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/registry.json");
            then.status(200).body("{}");
        });

        let fetcher = HttpFetcher::new().unwrap();
        let body = fetcher.fetch(&server.url("/registry.json")).unwrap();

        assert_eq!(body, "{}");
    }

    #[test]
    fn fetch_returns_error_on_404() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/missing.tsx");
            then.status(404).body("Not Found");
        });

        let fetcher = HttpFetcher::new().unwrap();
        let err = fetcher
            .fetch(&server.url("/missing.tsx"))
            .unwrap_err()
            .to_string();

        assert!(err.contains("404"), "Error should mention 404: {}", err);
    }

    #[test]
    fn fetch_returns_error_on_500() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/registry.json");
            then.status(500);
        });

        let fetcher = HttpFetcher::new().unwrap();
        let err = fetcher
            .fetch(&server.url("/registry.json"))
            .unwrap_err()
            .to_string();

        assert!(err.contains("500"), "Error should mention 500: {}", err);
    }
}
