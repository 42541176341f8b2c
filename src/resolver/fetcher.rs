//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the resolver, including:
//! - Building HTTP clients with proper user agent strings
//! - GET requests to fetch sitemap documents
//! - HEAD requests for lightweight existence probes
//! - Redirect and timeout policy enforcement
//! - Error classification

use crate::config::{NetworkConfig, UserAgentConfig};
use crate::{Result, SurveyorError};
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// One fetched document body with the headers the resolver cares about
#[derive(Debug, Clone)]
pub struct FetchedPayload {
    /// Final URL after redirects
    pub final_url: Url,

    /// HTTP status code
    pub status: u16,

    /// Content-Type header value (empty string when absent)
    pub content_type: String,

    /// Raw response body
    pub body: Vec<u8>,
}

/// Network capability the resolver and discovery layers depend on
///
/// The engine never talks to a transport directly; it goes through this trait
/// so tests can substitute doubles and callers can wrap the real client.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Fetches a URL, returning the body and content headers
    ///
    /// Non-2xx responses are errors; redirects are followed up to the
    /// configured bound.
    async fn fetch(&self, url: &Url) -> Result<FetchedPayload>;

    /// Lightweight existence check (HEAD)
    ///
    /// Returns false for any failure; discovery treats an unreachable
    /// candidate the same as a missing one.
    async fn probe(&self, url: &Url) -> bool;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `network` - Timeout and redirect policy
/// * `user_agent` - The user agent configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use sitemap_surveyor::config::{NetworkConfig, UserAgentConfig};
/// use sitemap_surveyor::resolver::build_http_client;
///
/// let client = build_http_client(&NetworkConfig::default(), &UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    network: &NetworkConfig,
    user_agent: &UserAgentConfig,
) -> std::result::Result<Client, reqwest::Error> {
    // Format: AgentName/Version (+ContactURL; ContactEmail)
    let ua = format!(
        "{}/{} (+{}; {})",
        user_agent.agent_name,
        user_agent.agent_version,
        user_agent.contact_url,
        user_agent.contact_email
    );

    let redirects = if network.max_redirects == 0 {
        Policy::none()
    } else {
        Policy::limited(network.max_redirects as usize)
    };

    Client::builder()
        .user_agent(ua)
        .timeout(Duration::from_secs(network.request_timeout))
        .connect_timeout(Duration::from_secs(network.connect_timeout))
        .redirect(redirects)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetcher backed by a reqwest client
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Wraps an already-built client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds the client from configuration and wraps it
    pub fn from_config(network: &NetworkConfig, user_agent: &UserAgentConfig) -> Result<Self> {
        let client = build_http_client(network, user_agent)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchedPayload> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| classify_request_error(url, e))?;

        let status = response.status();
        let final_url = response.url().clone();

        if !status.is_success() {
            return Err(SurveyorError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let body = response
            .bytes()
            .await
            .map_err(|e| classify_request_error(url, e))?
            .to_vec();

        Ok(FetchedPayload {
            final_url,
            status: status.as_u16(),
            content_type,
            body,
        })
    }

    async fn probe(&self, url: &Url) -> bool {
        match self.client.head(url.as_str()).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

/// Maps a reqwest error onto the resolver's error taxonomy
fn classify_request_error(url: &Url, e: reqwest::Error) -> SurveyorError {
    if e.is_timeout() {
        SurveyorError::Timeout {
            url: url.to_string(),
        }
    } else if e.is_redirect() {
        SurveyorError::RedirectLimit {
            url: url.to_string(),
        }
    } else if e.is_connect() {
        SurveyorError::Network {
            url: url.to_string(),
            reason: "connection failed".to_string(),
        }
    } else {
        SurveyorError::Network {
            url: url.to_string(),
            reason: e.to_string(),
        }
    }
}
