//! Sitemap discovery for sites whose sitemap URL is not known
//!
//! Discovery tries the conventional locations first with cheap HEAD probes,
//! then falls back to reading `Sitemap:` directives out of robots.txt. It
//! finds at most one candidate; resolving it is the caller's business.

use url::Url;

use crate::resolver::Fetch;
use crate::url::parse_absolute;
use crate::Result;

/// Well-known sitemap locations, probed in order
const CONVENTIONAL_PATHS: &[&str] = &[
    "/sitemap.xml",
    "/sitemap_index.xml",
    "/sitemap.xml.gz",
    "/sitemap/sitemap.xml",
];

/// Locates a sitemap for a site
///
/// # Arguments
///
/// * `fetcher` - The transport used for probes and the robots.txt fetch
/// * `site` - Any URL on the site; only its origin matters
///
/// # Returns
///
/// * `Ok(Some(url))` - The first conventional location that answered a HEAD
///   probe, or failing that the first usable `Sitemap:` directive in
///   robots.txt
/// * `Ok(None)` - Neither strategy produced a candidate; an unreachable or
///   absent robots.txt is a normal miss, not an error
pub async fn discover(fetcher: &dyn Fetch, site: &Url) -> Result<Option<Url>> {
    for path in CONVENTIONAL_PATHS {
        let candidate = site.join(path)?;
        tracing::debug!("Probing conventional sitemap location: {}", candidate);
        if fetcher.probe(&candidate).await {
            tracing::info!("Found sitemap at conventional location: {}", candidate);
            return Ok(Some(candidate));
        }
    }

    if let Some(found) = discover_from_robots(fetcher, site).await? {
        return Ok(Some(found));
    }

    tracing::info!("No sitemap discovered for {}", site);
    Ok(None)
}

/// Scans robots.txt for the first usable `Sitemap:` directive
async fn discover_from_robots(fetcher: &dyn Fetch, site: &Url) -> Result<Option<Url>> {
    let robots_url = site.join("/robots.txt")?;
    tracing::debug!("Checking {} for sitemap directives", robots_url);

    let payload = match fetcher.fetch(&robots_url).await {
        Ok(payload) => payload,
        Err(e) => {
            tracing::debug!("No robots.txt available for {}: {}", site, e);
            return Ok(None);
        }
    };

    let text = String::from_utf8_lossy(&payload.body);
    for line in text.lines() {
        if let Some(value) = sitemap_directive(line) {
            match parse_absolute(value) {
                Ok(found) => {
                    tracing::info!("Found sitemap via robots.txt directive: {}", found);
                    return Ok(Some(found));
                }
                Err(e) => {
                    tracing::debug!("Skipping unusable sitemap directive {:?}: {}", value, e);
                }
            }
        }
    }

    Ok(None)
}

/// Returns the value of a `Sitemap:` directive, matched case-insensitively
fn sitemap_directive(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    let prefix = trimmed.get(..8)?;
    if prefix.eq_ignore_ascii_case("sitemap:") {
        Some(trimmed[8..].trim())
    } else {
        None
    }
}
