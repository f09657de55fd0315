//! Registry fetching from remote sources.

pub mod http;

pub use http::HttpFetcher;
