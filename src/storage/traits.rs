//! Storage traits and error types
//!
//! This module defines the trait interface for storage backends and
//! associated error types.

use crate::resolver::{BranchError, SitemapEntry};
use crate::storage::{BranchErrorRecord, EntryRecord, RunRecord};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Run not found: {0}")]
    RunNotFound(i64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for storage backend implementations
///
/// This trait defines all database operations needed by the surveyor.
/// Implementations should provide thread-safe access to the underlying storage.
pub trait Storage {
    // ===== Run Management =====

    /// Creates a new resolution run
    ///
    /// # Arguments
    ///
    /// * `config_hash` - Hash of the configuration file
    /// * `root_url` - The sitemap or site URL the run starts from
    ///
    /// # Returns
    ///
    /// The ID of the newly created run
    fn create_run(&mut self, config_hash: &str, root_url: &str) -> StorageResult<i64>;

    /// Gets a run by ID
    fn get_run(&self, run_id: i64) -> StorageResult<RunRecord>;

    /// Gets the most recent run
    fn get_latest_run(&self) -> StorageResult<Option<RunRecord>>;

    /// Marks a run as completed with its final counts and a finish timestamp
    fn complete_run(&mut self, run_id: i64, url_count: u64, error_count: u64)
        -> StorageResult<()>;

    /// Marks a run as failed with the fatal error's message
    fn fail_run(&mut self, run_id: i64, message: &str) -> StorageResult<()>;

    // ===== Result Recording =====

    /// Records collected entries for a run in one transaction
    fn record_entries(&mut self, run_id: i64, entries: &[SitemapEntry]) -> StorageResult<()>;

    /// Records branch failures for a run in one transaction
    fn record_branch_errors(&mut self, run_id: i64, errors: &[BranchError]) -> StorageResult<()>;

    // ===== Retrieval =====

    /// Gets all entries recorded for a run, in insertion order
    fn get_entries(&self, run_id: i64) -> StorageResult<Vec<EntryRecord>>;

    /// Gets all branch errors recorded for a run
    fn get_branch_errors(&self, run_id: i64) -> StorageResult<Vec<BranchErrorRecord>>;

    // ===== Statistics =====

    /// Counts entries recorded for a run
    fn count_entries(&self, run_id: i64) -> StorageResult<u64>;

    /// Counts branch errors recorded for a run
    fn count_branch_errors(&self, run_id: i64) -> StorageResult<u64>;

    /// Counts distinct hosts among a run's entries
    fn count_distinct_hosts(&self, run_id: i64) -> StorageResult<u64>;

    /// Gets URL counts per host for a run, largest first
    fn get_host_breakdown(&self, run_id: i64) -> StorageResult<Vec<(String, u64)>>;
}
