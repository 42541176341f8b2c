//! URL handling module for Sitemap-Surveyor
//!
//! This module provides strict absolute-URL parsing, host extraction, and the
//! predicates the resolver and discovery layers share (does a URL already look
//! like a sitemap, are two URLs same-origin).

mod classify;
mod parse;

// Re-export main functions
pub use classify::{looks_like_sitemap, same_origin};
pub use parse::{extract_host, parse_absolute};
