//! Output module for generating run summaries and reports
//!
//! This module handles:
//! - Generating markdown summaries of resolution results
//! - Loading and printing run statistics
//! - Assembling summary data from the storage layer

mod markdown;
pub mod stats;

pub use markdown::{format_markdown_summary, generate_markdown_summary};
pub use stats::{load_statistics, print_statistics, ResolutionStatistics};

use crate::storage::Storage;
use crate::SurveyorError;

/// Summary data for one resolution run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    // Run metadata
    pub run_id: i64,
    pub root_url: String,
    pub started_at: String,
    pub finished_at: Option<String>,
    pub duration_seconds: Option<u64>,
    pub status: String,
    pub config_hash: String,
    pub error_message: Option<String>,

    // Overall statistics
    pub total_urls: u64,
    pub total_branch_errors: u64,
    pub distinct_hosts: u64,

    // URL counts per host, largest first
    pub host_breakdown: Vec<(String, u64)>,

    // Branch failures as (url, reason) pairs
    pub branch_errors: Vec<(String, String)>,
}

impl RunSummary {
    /// Creates a new empty run summary
    pub fn new() -> Self {
        Self::default()
    }
}

/// Generates a summary of the latest run from storage
///
/// # Arguments
///
/// * `storage` - The storage backend containing resolution data
///
/// # Returns
///
/// * `Ok(RunSummary)` - Successfully generated summary
/// * `Err(SurveyorError)` - No runs exist or a query failed
pub fn generate_summary(storage: &dyn Storage) -> Result<RunSummary, SurveyorError> {
    // Get the latest run
    let run = storage
        .get_latest_run()?
        .ok_or_else(|| SurveyorError::Output("No resolution runs found in database".to_string()))?;

    // Calculate duration if finished
    let duration_seconds = if let (Ok(started), Some(finished_str)) = (
        run.started_at.parse::<chrono::DateTime<chrono::Utc>>(),
        &run.finished_at,
    ) {
        if let Ok(finished) = finished_str.parse::<chrono::DateTime<chrono::Utc>>() {
            Some((finished - started).num_seconds() as u64)
        } else {
            None
        }
    } else {
        None
    };

    // Load statistics
    let stats = stats::load_statistics(storage, run.id)?;

    // Collect branch failures
    let branch_errors = storage
        .get_branch_errors(run.id)?
        .into_iter()
        .map(|e| (e.url, e.reason))
        .collect();

    Ok(RunSummary {
        run_id: run.id,
        root_url: run.root_url,
        started_at: run.started_at,
        finished_at: run.finished_at,
        duration_seconds,
        status: run.status.to_db_string().to_string(),
        config_hash: run.config_hash,
        error_message: run.error_message,
        total_urls: stats.total_urls,
        total_branch_errors: stats.branch_errors,
        distinct_hosts: stats.distinct_hosts,
        host_breakdown: stats.host_breakdown,
        branch_errors,
    })
}
