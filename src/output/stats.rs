//! Statistics generation from the resolution database
//!
//! This module provides functionality for extracting and displaying
//! statistics about a resolution run from the storage layer.

use crate::storage::{RunRecord, Storage};
use crate::SurveyorError;

/// Statistics for one resolution run
#[derive(Debug, Clone)]
pub struct ResolutionStatistics {
    /// Total number of URLs collected
    pub total_urls: u64,

    /// Number of branches that failed
    pub branch_errors: u64,

    /// Number of distinct hosts among the collected URLs
    pub distinct_hosts: u64,

    /// URL counts per host, largest first
    pub host_breakdown: Vec<(String, u64)>,
}

/// Loads statistics for a run from storage
///
/// # Arguments
///
/// * `storage` - The storage backend to query
/// * `run_id` - The run to summarize
///
/// # Returns
///
/// * `Ok(ResolutionStatistics)` - Successfully loaded statistics
/// * `Err(SurveyorError)` - Failed to query statistics
pub fn load_statistics(
    storage: &dyn Storage,
    run_id: i64,
) -> Result<ResolutionStatistics, SurveyorError> {
    let total_urls = storage.count_entries(run_id)?;
    let branch_errors = storage.count_branch_errors(run_id)?;
    let distinct_hosts = storage.count_distinct_hosts(run_id)?;
    let host_breakdown = storage.get_host_breakdown(run_id)?;

    Ok(ResolutionStatistics {
        total_urls,
        branch_errors,
        distinct_hosts,
        host_breakdown,
    })
}

/// Prints run statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `run` - The run the statistics belong to
/// * `stats` - The statistics to display
pub fn print_statistics(run: &RunRecord, stats: &ResolutionStatistics) {
    println!("=== Resolution Statistics ===\n");

    println!("Run {} ({})", run.id, run.status.to_db_string());
    println!("  Root URL: {}", run.root_url);
    println!("  Started: {}", run.started_at);
    if let Some(finished) = &run.finished_at {
        println!("  Finished: {}", finished);
    }
    if let Some(message) = &run.error_message {
        println!("  Error: {}", message);
    }
    println!();

    println!("Overview:");
    println!("  URLs collected: {}", stats.total_urls);
    println!("  Distinct hosts: {}", stats.distinct_hosts);
    println!("  Branch errors: {}", stats.branch_errors);
    println!();

    if !stats.host_breakdown.is_empty() {
        println!("URLs by Host:");
        for (host, count) in stats.host_breakdown.iter().take(10) {
            let percentage = if stats.total_urls > 0 {
                (*count as f64 / stats.total_urls as f64) * 100.0
            } else {
                0.0
            };
            println!("  {}: {} ({:.1}%)", host, count, percentage);
        }
        if stats.host_breakdown.len() > 10 {
            println!("  ... and {} more", stats.host_breakdown.len() - 10);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_statistics_creation() {
        let stats = ResolutionStatistics {
            total_urls: 150,
            branch_errors: 3,
            distinct_hosts: 2,
            host_breakdown: vec![
                ("example.com".to_string(), 120),
                ("cdn.example.com".to_string(), 30),
            ],
        };

        assert_eq!(stats.total_urls, 150);
        assert_eq!(stats.branch_errors, 3);
        assert_eq!(stats.distinct_hosts, 2);
    }
}
