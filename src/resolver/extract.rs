//! Sitemap document classification and extraction
//!
//! A decoded document is either a leaf sitemap (`urlset` root, listing page
//! URLs), a sitemap index (`sitemapindex` root, listing further sitemaps), or
//! something else entirely. Elements are matched by local name so namespaced
//! dialects and image/video/news extension elements pass through harmlessly.

use crate::{Result, SurveyorError};
use quick_xml::events::Event;
use quick_xml::Reader;
use url::Url;

/// Classification of a sitemap document by its root element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// `urlset` root: lists concrete page URLs
    Leaf,
    /// `sitemapindex` root: lists further sitemap documents
    Index,
    /// Anything else: contributes nothing, not an error
    Unknown,
}

/// One extracted record from a leaf sitemap
///
/// `lastmod` and `changefreq` are carried verbatim; `priority` is parsed to a
/// float but its documented 0.0-1.0 range is not enforced here. Validation of
/// all three is a consumer concern.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    /// Absolute page URL
    pub url: String,

    /// Last-modified timestamp, verbatim
    pub lastmod: Option<String>,

    /// Change-frequency token, verbatim and unvalidated
    pub changefreq: Option<String>,

    /// Priority value, unvalidated
    pub priority: Option<f32>,
}

/// The extracted content of one classified document
#[derive(Debug)]
pub enum ExtractedDocument {
    /// A leaf sitemap's entries; `truncated` is set when the entry budget ran
    /// out before the document did
    Leaf {
        entries: Vec<SitemapEntry>,
        truncated: bool,
    },

    /// A sitemap index's references, resolved to absolute URLs
    Index { references: Vec<Url> },

    /// Neither a urlset nor a sitemapindex
    Unknown,
}

impl ExtractedDocument {
    pub fn kind(&self) -> DocumentKind {
        match self {
            Self::Leaf { .. } => DocumentKind::Leaf,
            Self::Index { .. } => DocumentKind::Index,
            Self::Unknown => DocumentKind::Unknown,
        }
    }
}

/// Per-entry fields the extractor recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryField {
    Loc,
    Lastmod,
    Changefreq,
    Priority,
}

/// Classifies a decoded document and extracts its entries or references
///
/// # Arguments
///
/// * `text` - The decoded XML document
/// * `base` - The document's own URL, for resolving relative locations
/// * `budget` - Remaining entry allowance across the whole resolution; leaf
///   extraction stops as soon as this many entries have been emitted
///
/// # Returns
///
/// * `Ok(ExtractedDocument)` - Classified and extracted content
/// * `Err(SurveyorError::MalformedDocument)` - The document is not well-formed
///   XML; callers can distinguish this from a well-formed document with no
///   entries
///
/// Per-entry problems never fail the document: an entry or reference with a
/// missing or unresolvable location is skipped.
pub fn classify_and_extract(text: &str, base: &Url, budget: usize) -> Result<ExtractedDocument> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    // Classify by the root element's local name
    let kind = loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"urlset" => break DocumentKind::Leaf,
                b"sitemapindex" => break DocumentKind::Index,
                _ => return Ok(ExtractedDocument::Unknown),
            },
            Ok(Event::Empty(e)) => {
                // Self-closing root: well-formed but empty
                return Ok(match e.local_name().as_ref() {
                    b"urlset" => ExtractedDocument::Leaf {
                        entries: Vec::new(),
                        truncated: false,
                    },
                    b"sitemapindex" => ExtractedDocument::Index {
                        references: Vec::new(),
                    },
                    _ => ExtractedDocument::Unknown,
                });
            }
            Ok(Event::Eof) => return Err(malformed(base, "no root element")),
            Err(e) => return Err(malformed(base, &e.to_string())),
            _ => {}
        }
        buf.clear();
    };
    buf.clear();

    match kind {
        DocumentKind::Leaf => extract_leaf(&mut reader, base, budget),
        DocumentKind::Index => extract_index(&mut reader, base),
        DocumentKind::Unknown => Ok(ExtractedDocument::Unknown),
    }
}

/// Extracts page entries from a `urlset` body
///
/// Field elements are honored only as direct children of a `url` element, so
/// an extension element like `image:loc` nested one level deeper can never be
/// mistaken for the entry's own location.
fn extract_leaf(
    reader: &mut Reader<&[u8]>,
    base: &Url,
    budget: usize,
) -> Result<ExtractedDocument> {
    if budget == 0 {
        return Ok(ExtractedDocument::Leaf {
            entries: Vec::new(),
            truncated: true,
        });
    }

    let mut entries = Vec::new();
    let mut truncated = false;
    let mut buf = Vec::new();

    // Open elements below the root; 1 = <url>, 2 = its fields
    let mut depth = 0usize;
    let mut in_entry = false;
    let mut field: Option<EntryField> = None;

    let mut loc: Option<String> = None;
    let mut lastmod: Option<String> = None;
    let mut changefreq: Option<String> = None;
    let mut priority: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                depth += 1;
                if depth == 1 {
                    in_entry = e.local_name().as_ref() == b"url";
                    field = None;
                    loc = None;
                    lastmod = None;
                    changefreq = None;
                    priority = None;
                } else if depth == 2 && in_entry {
                    field = match e.local_name().as_ref() {
                        b"loc" => Some(EntryField::Loc),
                        b"lastmod" => Some(EntryField::Lastmod),
                        b"changefreq" => Some(EntryField::Changefreq),
                        b"priority" => Some(EntryField::Priority),
                        _ => None,
                    };
                } else {
                    field = None;
                }
            }
            Ok(Event::Text(t)) => {
                if let Some(f) = field {
                    let value = t
                        .unescape()
                        .map_err(|e| malformed(base, &e.to_string()))?
                        .trim()
                        .to_string();
                    assign_field(f, value, &mut loc, &mut lastmod, &mut changefreq, &mut priority);
                }
            }
            Ok(Event::CData(t)) => {
                if let Some(f) = field {
                    let value = String::from_utf8_lossy(&t.into_inner()).trim().to_string();
                    assign_field(f, value, &mut loc, &mut lastmod, &mut changefreq, &mut priority);
                }
            }
            Ok(Event::End(e)) => {
                if depth == 2 {
                    field = None;
                }
                if depth == 1 && in_entry && e.local_name().as_ref() == b"url" {
                    in_entry = false;
                    // Missing loc: skip the entry, never fail the document
                    if let Some(loc_text) = loc.take() {
                        if let Ok(resolved) = base.join(&loc_text) {
                            entries.push(SitemapEntry {
                                url: resolved.to_string(),
                                lastmod: lastmod.take(),
                                changefreq: changefreq.take(),
                                priority: priority.take().and_then(|p| p.parse().ok()),
                            });
                            if entries.len() >= budget {
                                truncated = true;
                                break;
                            }
                        }
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Empty(_)) => {
                // Self-closing element: carries no text, leaves depth unchanged
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(malformed(base, &e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(ExtractedDocument::Leaf { entries, truncated })
}

/// Extracts sitemap references from a `sitemapindex` body
///
/// Only the location matters here; `lastmod` on index entries carries no
/// weight in traversal decisions.
fn extract_index(reader: &mut Reader<&[u8]>, base: &Url) -> Result<ExtractedDocument> {
    let mut references = Vec::new();
    let mut buf = Vec::new();

    let mut depth = 0usize;
    let mut in_ref = false;
    let mut capturing_loc = false;
    let mut loc: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                depth += 1;
                if depth == 1 {
                    in_ref = e.local_name().as_ref() == b"sitemap";
                    capturing_loc = false;
                    loc = None;
                } else if depth == 2 && in_ref {
                    capturing_loc = e.local_name().as_ref() == b"loc";
                } else {
                    capturing_loc = false;
                }
            }
            Ok(Event::Text(t)) => {
                if capturing_loc {
                    let value = t
                        .unescape()
                        .map_err(|e| malformed(base, &e.to_string()))?
                        .trim()
                        .to_string();
                    loc = Some(value);
                }
            }
            Ok(Event::CData(t)) => {
                if capturing_loc {
                    loc = Some(String::from_utf8_lossy(&t.into_inner()).trim().to_string());
                }
            }
            Ok(Event::End(e)) => {
                if depth == 2 {
                    capturing_loc = false;
                }
                if depth == 1 && in_ref && e.local_name().as_ref() == b"sitemap" {
                    in_ref = false;
                    if let Some(loc_text) = loc.take() {
                        if let Ok(resolved) = base.join(&loc_text) {
                            references.push(resolved);
                        }
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Empty(_)) => {}
            Ok(Event::Eof) => break,
            Err(e) => return Err(malformed(base, &e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(ExtractedDocument::Index { references })
}

fn assign_field(
    field: EntryField,
    value: String,
    loc: &mut Option<String>,
    lastmod: &mut Option<String>,
    changefreq: &mut Option<String>,
    priority: &mut Option<String>,
) {
    if value.is_empty() {
        return;
    }
    match field {
        EntryField::Loc => *loc = Some(value),
        EntryField::Lastmod => *lastmod = Some(value),
        EntryField::Changefreq => *changefreq = Some(value),
        EntryField::Priority => *priority = Some(value),
    }
}

fn malformed(url: &Url, reason: &str) -> SurveyorError {
    SurveyorError::MalformedDocument {
        url: url.to_string(),
        reason: reason.to_string(),
    }
}
