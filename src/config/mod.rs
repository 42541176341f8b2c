//! Configuration module for Sitemap-Surveyor
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every field has a deployment default, so an empty file (or no file at all)
//! yields a working configuration.
//!
//! # Example
//!
//! ```no_run
//! use sitemap_surveyor::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Resolver will use max depth: {}", config.limits.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, LimitsConfig, NetworkConfig, OutputConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
