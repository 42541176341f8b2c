//! Storage module for persisting resolution results
//!
//! This module handles all database operations for the surveyor, including:
//! - SQLite database initialization and schema management
//! - Run tracking with final counts and failure messages
//! - Collected URL persistence with sitemap metadata
//! - Branch error persistence for partial resolutions

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStorage;
pub use traits::{Storage, StorageError, StorageResult};

use crate::SurveyorError;

use std::path::Path;

/// Initializes or opens a storage database
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file
///
/// # Returns
///
/// * `Ok(SqliteStorage)` - Successfully initialized storage
/// * `Err(SurveyorError)` - Failed to initialize storage
pub fn open_storage(path: &Path) -> Result<SqliteStorage, SurveyorError> {
    SqliteStorage::new(path)
}

/// Represents a resolution run
#[derive(Debug, Clone)]
pub struct RunRecord {
    pub id: i64,
    pub root_url: String,
    pub started_at: String,
    pub finished_at: Option<String>,
    pub config_hash: String,
    pub status: RunStatus,
    pub url_count: u64,
    pub error_count: u64,
    pub error_message: Option<String>,
}

/// Represents one collected URL with its sitemap metadata
#[derive(Debug, Clone)]
pub struct EntryRecord {
    pub id: i64,
    pub run_id: i64,
    pub url: String,
    pub host: Option<String>,
    pub lastmod: Option<String>,
    pub changefreq: Option<String>,
    pub priority: Option<f64>,
}

/// Represents one recorded branch failure
#[derive(Debug, Clone)]
pub struct BranchErrorRecord {
    pub id: i64,
    pub run_id: i64,
    pub url: String,
    pub reason: String,
}

/// Status of a resolution run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Running,
    Completed,
    Failed,
}

impl RunStatus {
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "running" => Some(Self::Running),
            "completed" => Some(Self::Completed),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }
}
