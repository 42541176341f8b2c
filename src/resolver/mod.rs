//! Resolver module for sitemap fetching and traversal
//!
//! This module contains the core resolution pipeline, including:
//! - HTTP fetching of sitemap documents
//! - Transparent gzip decoding
//! - Document classification and entry extraction
//! - Recursive traversal with cycle, depth, and cap limits

mod decompress;
mod extract;
mod fetcher;
mod traversal;

pub use decompress::{decode_body, is_gzip_payload};
pub use extract::{classify_and_extract, DocumentKind, ExtractedDocument, SitemapEntry};
pub use fetcher::{build_http_client, Fetch, FetchedPayload, HttpFetcher};
pub use traversal::{BranchError, Resolution, ResolvePolicy, Resolver};

use std::sync::Arc;

use crate::Result;

/// Resolves a sitemap tree in one call
///
/// This is the main entry point for resolving a sitemap. It will:
/// 1. Validate the root URL
/// 2. Fetch and decode each reachable document
/// 3. Classify documents as leaf sitemaps or sitemap indexes
/// 4. Recurse into indexes within the policy's depth and cap limits
/// 5. Collect page entries and per-branch failures
///
/// # Arguments
///
/// * `fetcher` - The transport used to retrieve documents
/// * `root_url` - Absolute URL of the root sitemap
/// * `policy` - Depth, cap, concurrency, and deadline limits
///
/// # Returns
///
/// * `Ok(Resolution)` - Collected entries, possibly partial
/// * `Err(SurveyorError)` - The root itself could not be resolved
pub async fn resolve(
    fetcher: Arc<dyn Fetch>,
    root_url: &str,
    policy: ResolvePolicy,
) -> Result<Resolution> {
    Resolver::new(fetcher, policy).resolve(root_url).await
}
