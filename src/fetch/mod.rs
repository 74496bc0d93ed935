// src/fetch/mod.rs
//! Page retrieval. Everything about getting bytes off the court site lives
//! here: headers, cookies, pacing, retries, and spotting soft-block pages.

pub mod block;
pub mod http;

use thiserror::Error;

pub use block::BlockDetector;
pub use http::HttpFetcher;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("invalid {name} header value")]
    InvalidHeader { name: &'static str },
    #[error("cannot build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Resolves a docket URL to raw page content.
pub trait Fetch {
    fn fetch(&mut self, url: &str) -> Result<String, FetchError>;
}
