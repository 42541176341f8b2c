use crate::UrlError;
use url::Url;

/// Parses a string into an absolute http(s) URL
///
/// Resolution and discovery both refuse to work on anything that is not an
/// absolute URL with a host, so malformed input fails here before any network
/// call is made.
///
/// # Arguments
///
/// * `input` - The URL string to parse
///
/// # Returns
///
/// * `Ok(Url)` - Parsed absolute URL
/// * `Err(UrlError)` - Malformed, non-http(s), or hostless input
///
/// # Examples
///
/// ```
/// use sitemap_surveyor::url::parse_absolute;
///
/// let url = parse_absolute("https://example.com/sitemap.xml").unwrap();
/// assert_eq!(url.host_str(), Some("example.com"));
///
/// assert!(parse_absolute("ftp://example.com/").is_err());
/// assert!(parse_absolute("not a url").is_err());
/// ```
pub fn parse_absolute(input: &str) -> Result<Url, UrlError> {
    let url = Url::parse(input.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    Ok(url)
}

/// Extracts the lowercase host from a URL
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}
