//! Sitemap-Surveyor: recursive sitemap resolution
//!
//! This crate walks a site's sitemap infrastructure — a single sitemap file or
//! a nested tree of sitemap indices — and returns the flat set of page URLs it
//! advertises, with per-branch failures isolated from the overall result.

pub mod config;
pub mod discovery;
pub mod output;
pub mod resolver;
pub mod scrape;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Sitemap-Surveyor operations
#[derive(Debug, Error)]
pub enum SurveyorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Network error for {url}: {reason}")]
    Network { url: String, reason: String },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Too many redirects from {url}")]
    RedirectLimit { url: String },

    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Failed to decode body from {url}: {reason}")]
    Decode { url: String, reason: String },

    #[error("Malformed sitemap document at {url}: {reason}")]
    MalformedDocument { url: String, reason: String },

    #[error("Storage error: {0}")]
    StorageError(#[from] storage::StorageError),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Output error: {0}")]
    Output(String),
}

impl SurveyorError {
    /// Returns true for fetch-level failures (as opposed to decode/parse ones)
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            Self::Network { .. }
                | Self::Timeout { .. }
                | Self::RedirectLimit { .. }
                | Self::HttpStatus { .. }
        )
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for Sitemap-Surveyor operations
pub type Result<T> = std::result::Result<T, SurveyorError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use resolver::{
    BranchError, DocumentKind, Fetch, HttpFetcher, Resolution, ResolvePolicy, Resolver,
    SitemapEntry,
};
pub use url::{looks_like_sitemap, parse_absolute, same_origin};
