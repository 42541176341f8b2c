//! Markdown summary generation
//!
//! This module generates human-readable markdown summaries of resolution
//! results, including statistics, host breakdowns, and branch failures.

use crate::output::RunSummary;
use crate::Result;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Generates a markdown summary file from a run summary
///
/// # Arguments
///
/// * `summary` - The run summary data
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote markdown summary
/// * `Err(SurveyorError)` - Failed to write summary
pub fn generate_markdown_summary(summary: &RunSummary, output_path: &Path) -> Result<()> {
    let markdown = format_markdown_summary(summary);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a run summary as markdown
///
/// # Arguments
///
/// * `summary` - The run summary data
///
/// # Returns
///
/// A formatted markdown string
pub fn format_markdown_summary(summary: &RunSummary) -> String {
    let mut md = String::new();

    // Title
    md.push_str("# Sitemap Survey Summary\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Run ID**: {}\n", summary.run_id));
    md.push_str(&format!("- **Root URL**: {}\n", summary.root_url));
    md.push_str(&format!("- **Started**: {}\n", summary.started_at));
    if let Some(finished) = &summary.finished_at {
        md.push_str(&format!("- **Finished**: {}\n", finished));
    }
    if let Some(duration) = summary.duration_seconds {
        md.push_str(&format!(
            "- **Duration**: {} seconds ({:.2} minutes)\n",
            duration,
            duration as f64 / 60.0
        ));
    }
    md.push_str(&format!("- **Status**: {}\n", summary.status));
    md.push_str(&format!("- **Config Hash**: {}\n\n", summary.config_hash));

    // Fatal failure, for runs that never produced results
    if let Some(message) = &summary.error_message {
        md.push_str("## Failure\n\n");
        md.push_str(&format!("The run failed: {}\n\n", message));
    }

    // Overall statistics
    md.push_str("## Overall Statistics\n\n");
    md.push_str(&format!("- **URLs Collected**: {}\n", summary.total_urls));
    md.push_str(&format!(
        "- **Distinct Hosts**: {}\n",
        summary.distinct_hosts
    ));
    md.push_str(&format!(
        "- **Branch Errors**: {}\n\n",
        summary.total_branch_errors
    ));

    // Host breakdown
    if !summary.host_breakdown.is_empty() {
        md.push_str("## URLs by Host\n\n");
        md.push_str("| Host | URLs |\n");
        md.push_str("|------|------|\n");

        for (host, count) in summary.host_breakdown.iter().take(50) {
            md.push_str(&format!("| {} | {} |\n", host, count));
        }
        if summary.host_breakdown.len() > 50 {
            md.push_str(&format!(
                "\n... and {} more hosts\n",
                summary.host_breakdown.len() - 50
            ));
        }
        md.push_str("\n");
    }

    // Branch failures
    if !summary.branch_errors.is_empty() {
        md.push_str("## Branch Errors\n\n");
        md.push_str("| Sitemap URL | Reason |\n");
        md.push_str("|-------------|--------|\n");

        for (url, reason) in summary.branch_errors.iter().take(20) {
            md.push_str(&format!("| {} | {} |\n", url, reason));
        }
        if summary.branch_errors.len() > 20 {
            md.push_str(&format!(
                "\n... and {} more\n",
                summary.branch_errors.len() - 20
            ));
        }
        md.push_str("\n");
    }

    md
}
