//! Database schema definitions
//!
//! This module contains all SQL schema definitions for the surveyor database.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- Track resolution runs
CREATE TABLE IF NOT EXISTS runs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    root_url TEXT NOT NULL,
    started_at TEXT NOT NULL,
    finished_at TEXT,
    config_hash TEXT NOT NULL,
    status TEXT NOT NULL,
    url_count INTEGER NOT NULL DEFAULT 0,
    error_count INTEGER NOT NULL DEFAULT 0,
    error_message TEXT
);

-- Page URLs collected from leaf sitemaps
CREATE TABLE IF NOT EXISTS discovered_urls (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    run_id INTEGER NOT NULL REFERENCES runs(id),
    url TEXT NOT NULL,
    host TEXT,
    lastmod TEXT,
    changefreq TEXT,
    priority REAL
);

CREATE INDEX IF NOT EXISTS idx_discovered_urls_run ON discovered_urls(run_id);
CREATE INDEX IF NOT EXISTS idx_discovered_urls_host ON discovered_urls(host);

-- Failures on branches below the root sitemap
CREATE TABLE IF NOT EXISTS branch_errors (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    run_id INTEGER NOT NULL REFERENCES runs(id),
    url TEXT NOT NULL,
    reason TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_branch_errors_run ON branch_errors(run_id);
"#;

/// Initializes the database schema
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
