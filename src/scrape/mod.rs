//! HTML fallback for sites that publish no sitemap
//!
//! When discovery comes up empty, the site's landing page is scraped for
//! anchor links instead. Only same-origin links are kept; how many were
//! dropped for crossing origins is reported alongside the survivors.

use std::collections::HashSet;

use scraper::{Html, Selector};
use url::Url;

use crate::resolver::{decode_body, is_gzip_payload, Fetch};
use crate::url::same_origin;
use crate::Result;

/// Links pulled from one HTML page
#[derive(Debug, Clone)]
pub struct LinkExtraction {
    /// Same-origin links in first-seen order, absolute and deduplicated
    pub links: Vec<String>,

    /// How many distinct links were discarded for pointing off-origin
    pub dropped_cross_origin: usize,
}

/// Extracts same-origin links from HTML content
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` tags anywhere in the document
///
/// **Exclude:**
/// - `<a href="..." download>`
/// - `javascript:`, `mailto:`, `tel:` links
/// - Data URIs and fragment-only anchors
/// - Links resolving outside the page's origin (counted, not kept)
///
/// **Note:** `rel="nofollow"` links ARE kept; the attribute addresses
/// crawlers ranking pages, not URL collection
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `page_url` - The page's own URL, for resolving relative links and
///   judging origin
pub fn extract_page_links(html: &str, page_url: &Url) -> LinkExtraction {
    let document = Html::parse_document(html);

    let mut links = Vec::new();
    let mut seen = HashSet::new();
    let mut dropped_cross_origin = 0;

    if let Ok(anchor_selector) = Selector::parse("a[href]") {
        for element in document.select(&anchor_selector) {
            // Skip if it has the download attribute
            if element.value().attr("download").is_some() {
                continue;
            }

            if let Some(href) = element.value().attr("href") {
                if let Some(resolved) = resolve_link(href, page_url) {
                    if !seen.insert(resolved.to_string()) {
                        continue;
                    }
                    if same_origin(&resolved, page_url) {
                        links.push(resolved.to_string());
                    } else {
                        dropped_cross_origin += 1;
                        tracing::debug!("Dropping cross-origin link: {}", resolved);
                    }
                }
            }
        }
    }

    LinkExtraction {
        links,
        dropped_cross_origin,
    }
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Fragment-only anchors
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    // Skip special schemes
    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    // Skip same-page anchors
    if href.starts_with('#') {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url)
            } else {
                None
            }
        }
        Err(_) => None,
    }
}

/// Fetches a site's landing page and extracts its same-origin links
///
/// # Arguments
///
/// * `fetcher` - The transport used to retrieve the page
/// * `site` - The page to scrape, normally the site root
///
/// # Returns
///
/// * `Ok(LinkExtraction)` - Links found on the page, possibly none
/// * `Err(SurveyorError)` - The page could not be fetched or decoded
pub async fn collect_fallback_links(fetcher: &dyn Fetch, site: &Url) -> Result<LinkExtraction> {
    let payload = fetcher.fetch(site).await?;
    let gzip = is_gzip_payload(&payload.final_url, &payload.content_type);
    let text = decode_body(&payload.final_url, &payload.body, gzip)?;

    let extraction = extract_page_links(&text, &payload.final_url);
    tracing::info!(
        "Collected {} same-origin links from {} ({} cross-origin dropped)",
        extraction.links.len(),
        payload.final_url,
        extraction.dropped_cross_origin
    );
    Ok(extraction)
}
