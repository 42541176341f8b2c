//! Body decoding
//!
//! Sitemaps are frequently served as gzip envelopes (`sitemap.xml.gz`). This
//! module derives the compression hint from the final URL and the content
//! headers, then decodes strictly: a payload that claims to be gzip but is not
//! fails with a decode error rather than being passed through as raw bytes.

use crate::{Result, SurveyorError};
use flate2::read::GzDecoder;
use std::io::Read;
use url::Url;

/// Derives the compression hint for a fetched payload
///
/// A payload is treated as gzip when the final URL path ends in `.gz` or the
/// Content-Type carries a gzip marker. Transport-level `Content-Encoding:
/// gzip` is already transparent at the client and never reaches this check.
pub fn is_gzip_payload(final_url: &Url, content_type: &str) -> bool {
    final_url.path().to_lowercase().ends_with(".gz") || content_type.to_lowercase().contains("gzip")
}

/// Decodes a raw body into text
///
/// # Arguments
///
/// * `url` - The document URL, for error context
/// * `body` - Raw response bytes
/// * `gzip` - The compression hint from [`is_gzip_payload`]
///
/// # Returns
///
/// * `Ok(String)` - Decoded UTF-8 text
/// * `Err(SurveyorError::Decode)` - Gzip envelope or UTF-8 decoding failed
pub fn decode_body(url: &Url, body: &[u8], gzip: bool) -> Result<String> {
    if gzip {
        let mut decoder = GzDecoder::new(body);
        let mut text = String::new();
        decoder
            .read_to_string(&mut text)
            .map_err(|e| SurveyorError::Decode {
                url: url.to_string(),
                reason: format!("gzip: {}", e),
            })?;
        Ok(text)
    } else {
        String::from_utf8(body.to_vec()).map_err(|e| SurveyorError::Decode {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    fn gzip_bytes(text: &str) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(text.as_bytes()).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_hint_from_gz_suffix() {
        assert!(is_gzip_payload(&url("https://x.com/sitemap.xml.gz"), ""));
        assert!(is_gzip_payload(
            &url("https://x.com/SITEMAP.XML.GZ"),
            "text/xml"
        ));
    }

    #[test]
    fn test_hint_from_content_type() {
        assert!(is_gzip_payload(
            &url("https://x.com/sitemap.xml"),
            "application/gzip"
        ));
        assert!(is_gzip_payload(
            &url("https://x.com/sitemap.xml"),
            "application/x-gzip"
        ));
    }

    #[test]
    fn test_no_hint_for_plain_xml() {
        assert!(!is_gzip_payload(
            &url("https://x.com/sitemap.xml"),
            "application/xml; charset=utf-8"
        ));
    }

    #[test]
    fn test_query_gz_does_not_hint() {
        assert!(!is_gzip_payload(
            &url("https://x.com/sitemap.xml?f=.gz"),
            "text/xml"
        ));
    }

    #[test]
    fn test_decode_plain_utf8() {
        let text = decode_body(&url("https://x.com/s.xml"), "<urlset/>".as_bytes(), false).unwrap();
        assert_eq!(text, "<urlset/>");
    }

    #[test]
    fn test_decode_gzip_roundtrip() {
        let original = "<urlset><url><loc>https://x.com/a</loc></url></urlset>";
        let compressed = gzip_bytes(original);
        let text = decode_body(&url("https://x.com/s.xml.gz"), &compressed, true).unwrap();
        assert_eq!(text, original);
    }

    #[test]
    fn test_bad_gzip_is_decode_error_not_fallback() {
        let result = decode_body(
            &url("https://x.com/s.xml.gz"),
            "this is not gzip".as_bytes(),
            true,
        );
        assert!(matches!(result, Err(SurveyorError::Decode { .. })));
    }

    #[test]
    fn test_invalid_utf8_is_decode_error() {
        let result = decode_body(&url("https://x.com/s.xml"), &[0xff, 0xfe, 0x00], false);
        assert!(matches!(result, Err(SurveyorError::Decode { .. })));
    }

    #[test]
    fn test_gzip_with_invalid_utf8_inside_is_decode_error() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&[0xff, 0xfe]).unwrap();
        let compressed = encoder.finish().unwrap();
        let result = decode_body(&url("https://x.com/s.xml.gz"), &compressed, true);
        assert!(matches!(result, Err(SurveyorError::Decode { .. })));
    }
}
