use url::Url;

/// Returns true if the URL already points at a sitemap-shaped resource
///
/// Discovery is skipped for these: a path ending in `.xml` or `.xml.gz`, or
/// any path containing a `/sitemap` segment, is handed straight to the
/// resolver.
///
/// # Examples
///
/// ```
/// use sitemap_surveyor::url::looks_like_sitemap;
/// use url::Url;
///
/// let url = Url::parse("https://example.com/sitemap.xml").unwrap();
/// assert!(looks_like_sitemap(&url));
///
/// let url = Url::parse("https://example.com/about").unwrap();
/// assert!(!looks_like_sitemap(&url));
/// ```
pub fn looks_like_sitemap(url: &Url) -> bool {
    let path = url.path().to_lowercase();
    path.ends_with(".xml") || path.ends_with(".xml.gz") || path.contains("/sitemap")
}

/// Returns true if two URLs share scheme, host, and port
pub fn same_origin(a: &Url, b: &Url) -> bool {
    a.scheme() == b.scheme()
        && a.host_str().map(|h| h.to_lowercase()) == b.host_str().map(|h| h.to_lowercase())
        && a.port_or_known_default() == b.port_or_known_default()
}
