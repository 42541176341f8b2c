//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the Storage trait.

use crate::resolver::{BranchError, SitemapEntry};
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{Storage, StorageError, StorageResult};
use crate::storage::{BranchErrorRecord, EntryRecord, RunRecord, RunStatus};
use crate::url::extract_host;
use crate::SurveyorError;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use url::Url;

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Creates a new SqliteStorage instance
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened/created database
    /// * `Err(SurveyorError)` - Failed to open database
    pub fn new(path: &Path) -> Result<Self, SurveyorError> {
        let conn = Connection::open(path)?;

        // Configure SQLite for better performance
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            PRAGMA temp_store = MEMORY;
            PRAGMA mmap_size = 268435456;
        ",
        )?;

        // Initialize schema
        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> Result<Self, SurveyorError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }
}

fn run_from_row(row: &Row<'_>) -> rusqlite::Result<RunRecord> {
    Ok(RunRecord {
        id: row.get(0)?,
        root_url: row.get(1)?,
        started_at: row.get(2)?,
        finished_at: row.get(3)?,
        config_hash: row.get(4)?,
        status: RunStatus::from_db_string(&row.get::<_, String>(5)?)
            .unwrap_or(RunStatus::Running),
        url_count: row.get::<_, i64>(6)? as u64,
        error_count: row.get::<_, i64>(7)? as u64,
        error_message: row.get(8)?,
    })
}

const RUN_COLUMNS: &str = "id, root_url, started_at, finished_at, config_hash, status, \
                           url_count, error_count, error_message";

impl Storage for SqliteStorage {
    // ===== Run Management =====

    fn create_run(&mut self, config_hash: &str, root_url: &str) -> StorageResult<i64> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO runs (root_url, started_at, config_hash, status) VALUES (?1, ?2, ?3, ?4)",
            params![root_url, now, config_hash, RunStatus::Running.to_db_string()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_run(&self, run_id: i64) -> StorageResult<RunRecord> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {} FROM runs WHERE id = ?1", RUN_COLUMNS))?;

        let run = stmt
            .query_row(params![run_id], run_from_row)
            .map_err(|_| StorageError::RunNotFound(run_id))?;

        Ok(run)
    }

    fn get_latest_run(&self) -> StorageResult<Option<RunRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM runs ORDER BY id DESC LIMIT 1",
            RUN_COLUMNS
        ))?;

        let run = stmt.query_row([], run_from_row).optional()?;

        Ok(run)
    }

    fn complete_run(
        &mut self,
        run_id: i64,
        url_count: u64,
        error_count: u64,
    ) -> StorageResult<()> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "UPDATE runs SET status = ?1, finished_at = ?2, url_count = ?3, error_count = ?4
             WHERE id = ?5",
            params![
                RunStatus::Completed.to_db_string(),
                now,
                url_count as i64,
                error_count as i64,
                run_id
            ],
        )?;
        Ok(())
    }

    fn fail_run(&mut self, run_id: i64, message: &str) -> StorageResult<()> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "UPDATE runs SET status = ?1, finished_at = ?2, error_message = ?3 WHERE id = ?4",
            params![RunStatus::Failed.to_db_string(), now, message, run_id],
        )?;
        Ok(())
    }

    // ===== Result Recording =====

    fn record_entries(&mut self, run_id: i64, entries: &[SitemapEntry]) -> StorageResult<()> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO discovered_urls (run_id, url, host, lastmod, changefreq, priority)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for entry in entries {
                let host = Url::parse(&entry.url).ok().and_then(|u| extract_host(&u));
                stmt.execute(params![
                    run_id,
                    entry.url,
                    host,
                    entry.lastmod,
                    entry.changefreq,
                    entry.priority.map(f64::from),
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn record_branch_errors(&mut self, run_id: i64, errors: &[BranchError]) -> StorageResult<()> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt =
                tx.prepare("INSERT INTO branch_errors (run_id, url, reason) VALUES (?1, ?2, ?3)")?;
            for error in errors {
                stmt.execute(params![run_id, error.url, error.error.to_string()])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    // ===== Retrieval =====

    fn get_entries(&self, run_id: i64) -> StorageResult<Vec<EntryRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, run_id, url, host, lastmod, changefreq, priority
             FROM discovered_urls WHERE run_id = ?1 ORDER BY id",
        )?;

        let entries = stmt
            .query_map(params![run_id], |row| {
                Ok(EntryRecord {
                    id: row.get(0)?,
                    run_id: row.get(1)?,
                    url: row.get(2)?,
                    host: row.get(3)?,
                    lastmod: row.get(4)?,
                    changefreq: row.get(5)?,
                    priority: row.get(6)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    fn get_branch_errors(&self, run_id: i64) -> StorageResult<Vec<BranchErrorRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, run_id, url, reason FROM branch_errors WHERE run_id = ?1 ORDER BY id",
        )?;

        let errors = stmt
            .query_map(params![run_id], |row| {
                Ok(BranchErrorRecord {
                    id: row.get(0)?,
                    run_id: row.get(1)?,
                    url: row.get(2)?,
                    reason: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(errors)
    }

    // ===== Statistics =====

    fn count_entries(&self, run_id: i64) -> StorageResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM discovered_urls WHERE run_id = ?1",
            params![run_id],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    fn count_branch_errors(&self, run_id: i64) -> StorageResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM branch_errors WHERE run_id = ?1",
            params![run_id],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    fn count_distinct_hosts(&self, run_id: i64) -> StorageResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(DISTINCT host) FROM discovered_urls
             WHERE run_id = ?1 AND host IS NOT NULL",
            params![run_id],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    fn get_host_breakdown(&self, run_id: i64) -> StorageResult<Vec<(String, u64)>> {
        let mut stmt = self.conn.prepare(
            "SELECT host, COUNT(*) as count FROM discovered_urls
             WHERE run_id = ?1 AND host IS NOT NULL
             GROUP BY host ORDER BY count DESC, host",
        )?;

        let hosts = stmt
            .query_map(params![run_id], |row| {
                Ok((row.get(0)?, row.get::<_, i64>(1)? as u64))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(hosts)
    }
}
