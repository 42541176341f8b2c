//! Sitemap Surveyor main entry point
//!
//! This is the command-line interface for the Sitemap Surveyor.

use clap::Parser;
use std::path::PathBuf;
use sitemap_surveyor::config::load_config_with_hash;
use tracing_subscriber::EnvFilter;

/// Sitemap Surveyor: a recursive sitemap resolver
///
/// The surveyor locates a site's sitemap, walks its tree of indexes and
/// leaf sitemaps, and collects the page URLs it declares into a local
/// database together with their metadata.
#[derive(Parser, Debug)]
#[command(name = "sitemap-surveyor")]
#[command(version = "0.1.0")]
#[command(about = "A recursive sitemap resolver", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Sitemap URL or site URL to resolve
    #[arg(value_name = "URL")]
    url: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Only locate the sitemap and print its URL, without resolving it
    #[arg(long, conflicts_with_all = ["stats", "export_summary"])]
    discover_only: bool,

    /// Show statistics for the latest run and exit
    #[arg(long, conflicts_with_all = ["discover_only", "export_summary"])]
    stats: bool,

    /// Generate a markdown summary from existing data and exit
    #[arg(long, conflicts_with_all = ["discover_only", "stats"])]
    export_summary: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // Handle different modes
    if cli.stats {
        handle_stats(&config)?;
    } else if cli.export_summary {
        handle_export_summary(&config)?;
    } else {
        let url = match cli.url {
            Some(url) => url,
            None => {
                return Err("a URL argument is required unless --stats or --export-summary is given".into());
            }
        };
        if cli.discover_only {
            handle_discover_only(&config, &url).await?;
        } else {
            handle_resolve(config, config_hash, url).await?;
        }
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitemap_surveyor=info,warn"),
            1 => EnvFilter::new("sitemap_surveyor=debug,info"),
            2 => EnvFilter::new("sitemap_surveyor=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --discover-only mode: locates the sitemap and prints its URL
async fn handle_discover_only(
    config: &sitemap_surveyor::config::Config,
    url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    use sitemap_surveyor::discovery::discover;
    use sitemap_surveyor::resolver::HttpFetcher;
    use sitemap_surveyor::url::parse_absolute;

    let site = parse_absolute(url)?;
    let fetcher = HttpFetcher::from_config(&config.network, &config.user_agent)?;

    match discover(&fetcher, &site).await? {
        Some(found) => println!("{}", found),
        None => println!("No sitemap found for {}", site),
    }

    Ok(())
}

/// Handles the --stats mode: shows statistics for the latest run
fn handle_stats(
    config: &sitemap_surveyor::config::Config,
) -> Result<(), Box<dyn std::error::Error>> {
    use sitemap_surveyor::output::{load_statistics, print_statistics};
    use sitemap_surveyor::storage::{SqliteStorage, Storage};
    use std::path::Path;

    println!("Database: {}\n", config.output.database_path);

    // Open the database
    let storage = SqliteStorage::new(Path::new(&config.output.database_path))?;

    let run = storage
        .get_latest_run()?
        .ok_or("no resolution runs found in database")?;

    // Load statistics for that run
    let stats = load_statistics(&storage, run.id)?;

    // Print statistics
    print_statistics(&run, &stats);

    Ok(())
}

/// Handles the --export-summary mode: generates a markdown summary
fn handle_export_summary(
    config: &sitemap_surveyor::config::Config,
) -> Result<(), Box<dyn std::error::Error>> {
    use sitemap_surveyor::output::{generate_markdown_summary, generate_summary};
    use sitemap_surveyor::storage::SqliteStorage;
    use std::path::Path;

    println!("=== Exporting Run Summary ===\n");
    println!("Database: {}", config.output.database_path);
    println!("Output: {}", config.output.summary_path);
    println!();

    // Open the database
    let storage = SqliteStorage::new(Path::new(&config.output.database_path))?;

    // Generate summary from storage
    tracing::info!("Loading run data from database...");
    let summary = generate_summary(&storage)?;

    // Write markdown summary to file
    tracing::info!("Generating markdown summary...");
    generate_markdown_summary(&summary, Path::new(&config.output.summary_path))?;

    println!("✓ Summary exported to: {}", config.output.summary_path);

    Ok(())
}

/// Handles the main resolution operation
async fn handle_resolve(
    config: sitemap_surveyor::config::Config,
    config_hash: String,
    url: String,
) -> Result<(), Box<dyn std::error::Error>> {
    use sitemap_surveyor::resolver::HttpFetcher;
    use sitemap_surveyor::storage::{SqliteStorage, Storage};
    use std::path::Path;
    use std::sync::Arc;

    let mut storage = SqliteStorage::new(Path::new(&config.output.database_path))?;
    let run_id = storage.create_run(&config_hash, &url)?;
    tracing::info!("Created run {} for {}", run_id, url);

    let fetcher = Arc::new(HttpFetcher::from_config(&config.network, &config.user_agent)?);

    match run_resolution(&config, fetcher, &url, run_id, &mut storage).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!("Resolution failed: {}", e);
            storage.fail_run(run_id, &e.to_string())?;
            Err(e.into())
        }
    }
}

/// Resolves the sitemap tree for `url` and records the outcome under `run_id`
///
/// A URL that does not look like a sitemap goes through discovery first; a
/// site without any sitemap falls back to landing-page link extraction.
async fn run_resolution(
    config: &sitemap_surveyor::config::Config,
    fetcher: std::sync::Arc<sitemap_surveyor::resolver::HttpFetcher>,
    url: &str,
    run_id: i64,
    storage: &mut sitemap_surveyor::storage::SqliteStorage,
) -> sitemap_surveyor::Result<()> {
    use sitemap_surveyor::discovery::discover;
    use sitemap_surveyor::resolver::{ResolvePolicy, Resolver, SitemapEntry};
    use sitemap_surveyor::scrape::collect_fallback_links;
    use sitemap_surveyor::storage::Storage;
    use sitemap_surveyor::url::{looks_like_sitemap, parse_absolute};

    let parsed = parse_absolute(url)?;

    let root = if looks_like_sitemap(&parsed) {
        parsed
    } else {
        tracing::info!("{} does not look like a sitemap, discovering one", parsed);
        match discover(fetcher.as_ref(), &parsed).await? {
            Some(found) => found,
            None => {
                tracing::info!("No sitemap available, scraping the landing page instead");
                let extraction = collect_fallback_links(fetcher.as_ref(), &parsed).await?;
                let entries: Vec<SitemapEntry> = extraction
                    .links
                    .into_iter()
                    .map(|link| SitemapEntry {
                        url: link,
                        lastmod: None,
                        changefreq: None,
                        priority: None,
                    })
                    .collect();
                storage.record_entries(run_id, &entries)?;
                storage.complete_run(run_id, entries.len() as u64, 0)?;
                println!(
                    "Collected {} landing-page links from {} ({} cross-origin dropped)",
                    entries.len(),
                    parsed,
                    extraction.dropped_cross_origin
                );
                return Ok(());
            }
        }
    };

    let policy = ResolvePolicy::from_limits(&config.limits);
    let resolver = Resolver::new(fetcher, policy);
    let resolution = resolver.resolve(root.as_str()).await?;

    storage.record_entries(run_id, &resolution.entries)?;
    storage.record_branch_errors(run_id, &resolution.branch_errors)?;
    storage.complete_run(
        run_id,
        resolution.entries.len() as u64,
        resolution.branch_errors.len() as u64,
    )?;

    println!(
        "Resolved {} URLs from {} documents under {}",
        resolution.entries.len(),
        resolution.documents_fetched,
        root
    );
    if !resolution.branch_errors.is_empty() {
        println!(
            "{} branches failed; details are stored with run {}",
            resolution.branch_errors.len(),
            run_id
        );
    }
    if resolution.cap_reached {
        println!(
            "URL cap of {} reached; results are truncated",
            config.limits.max_urls
        );
    }
    if resolution.depth_limited {
        println!(
            "Depth limit of {} reached; some indexes were left unresolved",
            config.limits.max_depth
        );
    }
    if resolution.deadline_hit {
        println!("Deadline elapsed; results are partial");
    }

    Ok(())
}
