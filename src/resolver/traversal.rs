//! Recursive resolution of sitemap trees
//!
//! The resolver walks a sitemap graph from a root URL: leaf sitemaps
//! contribute their entries to the shared result, index sitemaps are descended
//! into until a depth limit runs out. A visited set breaks reference cycles,
//! a global entry cap bounds the output, and a semaphore bounds how many
//! documents are in flight at once. Failures below the root never abort the
//! walk; they are recorded per branch so a partial tree still yields results.

use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::stream::{self, StreamExt};
use tokio::sync::Semaphore;
use url::Url;

use crate::config::LimitsConfig;
use crate::resolver::decompress::{decode_body, is_gzip_payload};
use crate::resolver::extract::{classify_and_extract, ExtractedDocument, SitemapEntry};
use crate::resolver::fetcher::Fetch;
use crate::url::parse_absolute;
use crate::{Result, SurveyorError};

/// Limits governing a single resolution
#[derive(Debug, Clone)]
pub struct ResolvePolicy {
    /// How many index levels may be descended below the root document
    pub max_depth: u32,

    /// Global cap on collected entries across the whole tree
    pub max_urls: usize,

    /// How many documents may be fetched concurrently
    pub workers: usize,

    /// Optional wall-clock bound; when it elapses the walk stops and whatever
    /// was collected so far is returned
    pub deadline: Option<Duration>,
}

impl ResolvePolicy {
    pub fn from_limits(limits: &LimitsConfig) -> Self {
        Self {
            max_depth: limits.max_depth,
            max_urls: limits.max_urls,
            workers: limits.workers,
            deadline: limits.resolve_deadline.map(Duration::from_secs),
        }
    }
}

impl Default for ResolvePolicy {
    fn default() -> Self {
        Self {
            max_depth: 5,
            max_urls: 50_000,
            workers: 4,
            deadline: None,
        }
    }
}

/// A failure on one branch of the tree, recorded without aborting the walk
#[derive(Debug)]
pub struct BranchError {
    /// The sitemap URL that failed
    pub url: String,

    /// What went wrong fetching, decoding, or parsing it
    pub error: SurveyorError,
}

/// The outcome of resolving one sitemap tree
#[derive(Debug)]
pub struct Resolution {
    /// Collected page entries, in discovery order
    pub entries: Vec<SitemapEntry>,

    /// Branches that failed below the root
    pub branch_errors: Vec<BranchError>,

    /// True when the entry cap cut collection short
    pub cap_reached: bool,

    /// True when at least one index was left undescended by the depth limit
    pub depth_limited: bool,

    /// True when the deadline elapsed before the walk finished
    pub deadline_hit: bool,

    /// How many sitemap documents were requested
    pub documents_fetched: usize,
}

impl Resolution {
    /// The collected URLs without their metadata
    pub fn urls(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.url.as_str()).collect()
    }
}

/// Mutable state shared across all branches of one resolution
struct TraversalState {
    visited: HashSet<String>,
    max_urls: usize,
    entries: Vec<SitemapEntry>,
    branch_errors: Vec<BranchError>,
    cap_reached: bool,
    depth_limited: bool,
    documents_fetched: usize,
}

impl TraversalState {
    fn new(max_urls: usize) -> Self {
        Self {
            visited: HashSet::new(),
            max_urls,
            entries: Vec::new(),
            branch_errors: Vec::new(),
            cap_reached: false,
            depth_limited: false,
            documents_fetched: 0,
        }
    }

    /// Marks a URL visited; false means some branch already claimed it
    fn first_visit(&mut self, url: &Url) -> bool {
        self.visited.insert(url.to_string())
    }

    fn remaining_budget(&self) -> usize {
        self.max_urls.saturating_sub(self.entries.len())
    }

    /// Folds one leaf's entries into the shared result, enforcing the cap
    ///
    /// The budget handed to extraction was read before other branches may
    /// have committed, so the room is re-checked here under the same lock
    /// that guards the entries.
    fn commit_entries(&mut self, batch: Vec<SitemapEntry>, truncated: bool) {
        let room = self.remaining_budget();
        if batch.len() > room {
            self.cap_reached = true;
        }
        self.entries.extend(batch.into_iter().take(room));
        if truncated || self.entries.len() >= self.max_urls {
            self.cap_reached = true;
        }
    }

    fn record_branch_error(&mut self, url: &Url, error: SurveyorError) {
        self.branch_errors.push(BranchError {
            url: url.to_string(),
            error,
        });
    }

    fn drain_into_resolution(&mut self, deadline_hit: bool) -> Resolution {
        Resolution {
            entries: std::mem::take(&mut self.entries),
            branch_errors: std::mem::take(&mut self.branch_errors),
            cap_reached: self.cap_reached,
            depth_limited: self.depth_limited,
            deadline_hit,
            documents_fetched: self.documents_fetched,
        }
    }
}

/// Shared handles each branch of the walk needs
struct ResolutionCtx {
    state: Mutex<TraversalState>,
    gate: Semaphore,
}

/// Walks sitemap trees and collects their page URLs
pub struct Resolver {
    fetcher: Arc<dyn Fetch>,
    policy: ResolvePolicy,
}

impl Resolver {
    pub fn new(fetcher: Arc<dyn Fetch>, policy: ResolvePolicy) -> Self {
        Self { fetcher, policy }
    }

    /// Resolves the sitemap tree rooted at `root_url`
    ///
    /// # Arguments
    ///
    /// * `root_url` - Absolute URL of the root sitemap document
    ///
    /// # Returns
    ///
    /// * `Ok(Resolution)` - Collected entries and branch errors; a failing
    ///   branch below the root still yields a successful, partial resolution
    /// * `Err` - The root URL is invalid, or the root document itself could
    ///   not be fetched, decoded, or parsed
    pub async fn resolve(&self, root_url: &str) -> Result<Resolution> {
        let root = parse_absolute(root_url).map_err(|e| SurveyorError::InvalidUrl {
            url: root_url.to_string(),
            reason: e.to_string(),
        })?;

        tracing::info!("Resolving sitemap tree from {}", root);

        let ctx = Arc::new(ResolutionCtx {
            state: Mutex::new(TraversalState::new(self.policy.max_urls)),
            gate: Semaphore::new(self.policy.workers),
        });

        let work = self.resolve_node(root, self.policy.max_depth, Arc::clone(&ctx), true);

        let mut deadline_hit = false;
        let outcome = match self.policy.deadline {
            Some(limit) => match tokio::time::timeout(limit, work).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!(
                        "Resolution deadline of {:?} elapsed, returning partial results",
                        limit
                    );
                    deadline_hit = true;
                    Ok(())
                }
            },
            None => work.await,
        };

        // Only a root failure propagates; branch failures were recorded
        outcome?;

        let resolution = ctx
            .state
            .lock()
            .unwrap()
            .drain_into_resolution(deadline_hit);

        tracing::info!(
            "Resolution complete: {} URLs from {} documents, {} branch errors",
            resolution.entries.len(),
            resolution.documents_fetched,
            resolution.branch_errors.len()
        );

        Ok(resolution)
    }

    /// Resolves one node of the tree, recursing into index children
    ///
    /// Boxed because the recursion depth is only known at runtime. The cap
    /// and visited checks share a single lock acquisition so two branches
    /// racing for the same URL cannot both claim it.
    fn resolve_node(
        &self,
        url: Url,
        depth: u32,
        ctx: Arc<ResolutionCtx>,
        is_root: bool,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move {
            {
                let mut state = ctx.state.lock().unwrap();
                if state.cap_reached {
                    return Ok(());
                }
                if !state.first_visit(&url) {
                    tracing::debug!("Already visited, skipping: {}", url);
                    return Ok(());
                }
                state.documents_fetched += 1;
            }

            match self.process_node(&url, depth, &ctx).await {
                Ok(()) => Ok(()),
                Err(error) if is_root => Err(error),
                Err(error) => {
                    tracing::warn!("Branch failed for {}: {}", url, error);
                    ctx.state.lock().unwrap().record_branch_error(&url, error);
                    Ok(())
                }
            }
        })
    }

    /// Fetches, decodes, classifies, and acts on one document
    async fn process_node(&self, url: &Url, depth: u32, ctx: &Arc<ResolutionCtx>) -> Result<()> {
        // The permit covers fetch through extraction, then is released before
        // any recursion so a deep tree cannot starve itself of permits
        let document = {
            let _permit = ctx.gate.acquire().await.expect("resolution gate closed");
            let payload = self.fetcher.fetch(url).await?;
            let gzip = is_gzip_payload(&payload.final_url, &payload.content_type);
            let text = decode_body(&payload.final_url, &payload.body, gzip)?;
            let budget = ctx.state.lock().unwrap().remaining_budget();
            classify_and_extract(&text, &payload.final_url, budget)?
        };

        match document {
            ExtractedDocument::Leaf { entries, truncated } => {
                let count = entries.len();
                let mut state = ctx.state.lock().unwrap();
                state.commit_entries(entries, truncated);
                tracing::debug!(
                    "Collected {} entries from {}, {} total",
                    count,
                    url,
                    state.entries.len()
                );
                Ok(())
            }
            ExtractedDocument::Index { references } => {
                if depth == 0 {
                    tracing::info!(
                        "Depth limit reached at {}, leaving {} references unresolved",
                        url,
                        references.len()
                    );
                    ctx.state.lock().unwrap().depth_limited = true;
                    return Ok(());
                }
                tracing::debug!(
                    "Descending into index {} with {} references",
                    url,
                    references.len()
                );
                let children = references
                    .into_iter()
                    .map(|child| self.resolve_node(child, depth - 1, Arc::clone(ctx), false));
                let mut outcomes = stream::iter(children).buffer_unordered(self.policy.workers);
                while let Some(outcome) = outcomes.next().await {
                    outcome?;
                }
                Ok(())
            }
            ExtractedDocument::Unknown => {
                tracing::debug!("Unrecognized document at {}, nothing to collect", url);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::fetcher::FetchedPayload;
    use async_trait::async_trait;
    use std::collections::HashMap;

    /// Canned responses keyed by URL, counting how often each is requested
    struct StubFetcher {
        bodies: HashMap<String, std::result::Result<String, u16>>,
        slow: HashSet<String>,
        hits: Mutex<HashMap<String, usize>>,
    }

    impl StubFetcher {
        fn new() -> Self {
            Self {
                bodies: HashMap::new(),
                slow: HashSet::new(),
                hits: Mutex::new(HashMap::new()),
            }
        }

        fn with_doc(mut self, url: &str, body: &str) -> Self {
            self.bodies.insert(url.to_string(), Ok(body.to_string()));
            self
        }

        fn with_failure(mut self, url: &str, status: u16) -> Self {
            self.bodies.insert(url.to_string(), Err(status));
            self
        }

        fn with_slow_doc(mut self, url: &str, body: &str) -> Self {
            self.slow.insert(url.to_string());
            self.with_doc(url, body)
        }

        fn hits(&self, url: &str) -> usize {
            *self.hits.lock().unwrap().get(url).unwrap_or(&0)
        }
    }

    #[async_trait]
    impl Fetch for StubFetcher {
        async fn fetch(&self, url: &Url) -> Result<FetchedPayload> {
            *self
                .hits
                .lock()
                .unwrap()
                .entry(url.to_string())
                .or_insert(0) += 1;
            if self.slow.contains(url.as_str()) {
                tokio::time::sleep(Duration::from_secs(10)).await;
            }
            match self.bodies.get(url.as_str()) {
                Some(Ok(body)) => Ok(FetchedPayload {
                    final_url: url.clone(),
                    status: 200,
                    content_type: "application/xml".to_string(),
                    body: body.clone().into_bytes(),
                }),
                Some(Err(status)) => Err(SurveyorError::HttpStatus {
                    url: url.to_string(),
                    status: *status,
                }),
                None => Err(SurveyorError::Network {
                    url: url.to_string(),
                    reason: "no stubbed response".to_string(),
                }),
            }
        }

        async fn probe(&self, url: &Url) -> bool {
            self.bodies.contains_key(url.as_str())
        }
    }

    fn leaf(urls: &[&str]) -> String {
        let mut body = String::from("<urlset>");
        for u in urls {
            body.push_str("<url><loc>");
            body.push_str(u);
            body.push_str("</loc></url>");
        }
        body.push_str("</urlset>");
        body
    }

    fn index(refs: &[&str]) -> String {
        let mut body = String::from("<sitemapindex>");
        for r in refs {
            body.push_str("<sitemap><loc>");
            body.push_str(r);
            body.push_str("</loc></sitemap>");
        }
        body.push_str("</sitemapindex>");
        body
    }

    fn resolver(fetcher: StubFetcher, policy: ResolvePolicy) -> Resolver {
        Resolver::new(Arc::new(fetcher), policy)
    }

    #[test]
    fn test_policy_from_limits() {
        let limits = LimitsConfig {
            max_depth: 3,
            max_urls: 100,
            workers: 2,
            resolve_deadline: Some(60),
        };
        let policy = ResolvePolicy::from_limits(&limits);
        assert_eq!(policy.max_depth, 3);
        assert_eq!(policy.max_urls, 100);
        assert_eq!(policy.workers, 2);
        assert_eq!(policy.deadline, Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_policy_default() {
        let policy = ResolvePolicy::default();
        assert_eq!(policy.max_depth, 5);
        assert_eq!(policy.max_urls, 50_000);
        assert!(policy.deadline.is_none());
    }

    #[tokio::test]
    async fn test_single_leaf_resolution() {
        let fetcher = StubFetcher::new().with_doc(
            "https://example.com/sitemap.xml",
            &leaf(&["https://example.com/a", "https://example.com/b"]),
        );
        let resolution = resolver(fetcher, ResolvePolicy::default())
            .resolve("https://example.com/sitemap.xml")
            .await
            .unwrap();

        assert_eq!(
            resolution.urls(),
            vec!["https://example.com/a", "https://example.com/b"]
        );
        assert!(resolution.branch_errors.is_empty());
        assert!(!resolution.cap_reached);
        assert!(!resolution.depth_limited);
        assert!(!resolution.deadline_hit);
        assert_eq!(resolution.documents_fetched, 1);
    }

    #[tokio::test]
    async fn test_index_descends_to_leaves() {
        let fetcher = StubFetcher::new()
            .with_doc(
                "https://example.com/sitemap.xml",
                &index(&[
                    "https://example.com/pages.xml",
                    "https://example.com/posts.xml",
                ]),
            )
            .with_doc(
                "https://example.com/pages.xml",
                &leaf(&["https://example.com/p1", "https://example.com/p2"]),
            )
            .with_doc(
                "https://example.com/posts.xml",
                &leaf(&["https://example.com/b1", "https://example.com/b2"]),
            );
        let resolution = resolver(fetcher, ResolvePolicy::default())
            .resolve("https://example.com/sitemap.xml")
            .await
            .unwrap();

        assert_eq!(resolution.entries.len(), 4);
        assert_eq!(resolution.documents_fetched, 3);
        assert!(resolution.branch_errors.is_empty());
    }

    #[tokio::test]
    async fn test_cycle_terminates_with_each_fetched_once() {
        let fetcher = Arc::new(
            StubFetcher::new()
                .with_doc(
                    "https://example.com/a.xml",
                    &index(&["https://example.com/b.xml"]),
                )
                .with_doc(
                    "https://example.com/b.xml",
                    &index(&[
                        "https://example.com/a.xml",
                        "https://example.com/leaf.xml",
                    ]),
                )
                .with_doc(
                    "https://example.com/leaf.xml",
                    &leaf(&["https://example.com/page"]),
                ),
        );
        let r = Resolver::new(
            Arc::clone(&fetcher) as Arc<dyn Fetch>,
            ResolvePolicy::default(),
        );
        let resolution = r.resolve("https://example.com/a.xml").await.unwrap();

        assert_eq!(resolution.urls(), vec!["https://example.com/page"]);
        assert_eq!(fetcher.hits("https://example.com/a.xml"), 1);
        assert_eq!(fetcher.hits("https://example.com/b.xml"), 1);
        assert!(resolution.branch_errors.is_empty());
    }

    #[tokio::test]
    async fn test_shared_reference_fetched_once() {
        let fetcher = Arc::new(
            StubFetcher::new()
                .with_doc(
                    "https://example.com/root.xml",
                    &index(&[
                        "https://example.com/left.xml",
                        "https://example.com/right.xml",
                    ]),
                )
                .with_doc(
                    "https://example.com/left.xml",
                    &index(&["https://example.com/shared.xml"]),
                )
                .with_doc(
                    "https://example.com/right.xml",
                    &index(&["https://example.com/shared.xml"]),
                )
                .with_doc(
                    "https://example.com/shared.xml",
                    &leaf(&["https://example.com/page"]),
                ),
        );
        let r = Resolver::new(
            Arc::clone(&fetcher) as Arc<dyn Fetch>,
            ResolvePolicy::default(),
        );
        let resolution = r.resolve("https://example.com/root.xml").await.unwrap();

        assert_eq!(resolution.entries.len(), 1);
        assert_eq!(fetcher.hits("https://example.com/shared.xml"), 1);
    }

    #[tokio::test]
    async fn test_depth_zero_still_collects_root_leaf() {
        let fetcher = StubFetcher::new().with_doc(
            "https://example.com/sitemap.xml",
            &leaf(&["https://example.com/a"]),
        );
        let policy = ResolvePolicy {
            max_depth: 0,
            ..Default::default()
        };
        let resolution = resolver(fetcher, policy)
            .resolve("https://example.com/sitemap.xml")
            .await
            .unwrap();

        assert_eq!(resolution.entries.len(), 1);
        assert!(!resolution.depth_limited);
    }

    #[tokio::test]
    async fn test_depth_zero_suppresses_index_children() {
        let fetcher = Arc::new(
            StubFetcher::new()
                .with_doc(
                    "https://example.com/sitemap.xml",
                    &index(&["https://example.com/child.xml"]),
                )
                .with_doc(
                    "https://example.com/child.xml",
                    &leaf(&["https://example.com/page"]),
                ),
        );
        let policy = ResolvePolicy {
            max_depth: 0,
            ..Default::default()
        };
        let r = Resolver::new(Arc::clone(&fetcher) as Arc<dyn Fetch>, policy);
        let resolution = r.resolve("https://example.com/sitemap.xml").await.unwrap();

        assert!(resolution.entries.is_empty());
        assert!(resolution.depth_limited);
        assert_eq!(fetcher.hits("https://example.com/child.xml"), 0);
    }

    #[tokio::test]
    async fn test_depth_boundary_one_level_short() {
        // root index -> mid index -> leaf needs depth 2; depth 1 reaches the
        // mid index but must stop there
        let docs = |fetcher: StubFetcher| {
            fetcher
                .with_doc(
                    "https://example.com/root.xml",
                    &index(&["https://example.com/mid.xml"]),
                )
                .with_doc(
                    "https://example.com/mid.xml",
                    &index(&["https://example.com/leaf.xml"]),
                )
                .with_doc(
                    "https://example.com/leaf.xml",
                    &leaf(&["https://example.com/page"]),
                )
        };

        let shallow = Arc::new(docs(StubFetcher::new()));
        let r = Resolver::new(
            Arc::clone(&shallow) as Arc<dyn Fetch>,
            ResolvePolicy {
                max_depth: 1,
                ..Default::default()
            },
        );
        let resolution = r.resolve("https://example.com/root.xml").await.unwrap();
        assert!(resolution.entries.is_empty());
        assert!(resolution.depth_limited);
        assert_eq!(shallow.hits("https://example.com/mid.xml"), 1);
        assert_eq!(shallow.hits("https://example.com/leaf.xml"), 0);

        let deep = docs(StubFetcher::new());
        let resolution = resolver(
            deep,
            ResolvePolicy {
                max_depth: 2,
                ..Default::default()
            },
        )
        .resolve("https://example.com/root.xml")
        .await
        .unwrap();
        assert_eq!(resolution.entries.len(), 1);
        assert!(!resolution.depth_limited);
    }

    #[tokio::test]
    async fn test_cap_stops_collection_and_skips_siblings() {
        let fetcher = Arc::new(
            StubFetcher::new()
                .with_doc(
                    "https://example.com/root.xml",
                    &index(&[
                        "https://example.com/first.xml",
                        "https://example.com/second.xml",
                    ]),
                )
                .with_doc(
                    "https://example.com/first.xml",
                    &leaf(&[
                        "https://example.com/1",
                        "https://example.com/2",
                        "https://example.com/3",
                    ]),
                )
                .with_doc(
                    "https://example.com/second.xml",
                    &leaf(&["https://example.com/4"]),
                ),
        );
        // One worker keeps the sibling order deterministic
        let policy = ResolvePolicy {
            max_urls: 3,
            workers: 1,
            ..Default::default()
        };
        let r = Resolver::new(Arc::clone(&fetcher) as Arc<dyn Fetch>, policy);
        let resolution = r.resolve("https://example.com/root.xml").await.unwrap();

        assert_eq!(resolution.entries.len(), 3);
        assert!(resolution.cap_reached);
        assert_eq!(fetcher.hits("https://example.com/second.xml"), 0);
    }

    #[tokio::test]
    async fn test_cap_truncates_within_one_leaf() {
        let fetcher = StubFetcher::new().with_doc(
            "https://example.com/sitemap.xml",
            &leaf(&[
                "https://example.com/1",
                "https://example.com/2",
                "https://example.com/3",
            ]),
        );
        let policy = ResolvePolicy {
            max_urls: 2,
            ..Default::default()
        };
        let resolution = resolver(fetcher, policy)
            .resolve("https://example.com/sitemap.xml")
            .await
            .unwrap();

        assert_eq!(
            resolution.urls(),
            vec!["https://example.com/1", "https://example.com/2"]
        );
        assert!(resolution.cap_reached);
    }

    #[tokio::test]
    async fn test_branch_failure_yields_partial_resolution() {
        let fetcher = StubFetcher::new()
            .with_doc(
                "https://example.com/root.xml",
                &index(&[
                    "https://example.com/good.xml",
                    "https://example.com/bad.xml",
                ]),
            )
            .with_doc(
                "https://example.com/good.xml",
                &leaf(&["https://example.com/a", "https://example.com/b"]),
            )
            .with_failure("https://example.com/bad.xml", 500);
        let resolution = resolver(fetcher, ResolvePolicy::default())
            .resolve("https://example.com/root.xml")
            .await
            .unwrap();

        assert_eq!(resolution.entries.len(), 2);
        assert_eq!(resolution.branch_errors.len(), 1);
        assert_eq!(resolution.branch_errors[0].url, "https://example.com/bad.xml");
        assert!(matches!(
            resolution.branch_errors[0].error,
            SurveyorError::HttpStatus { status: 500, .. }
        ));
    }

    #[tokio::test]
    async fn test_malformed_branch_recorded_not_fatal() {
        let fetcher = StubFetcher::new()
            .with_doc(
                "https://example.com/root.xml",
                &index(&[
                    "https://example.com/ok.xml",
                    "https://example.com/broken.xml",
                ]),
            )
            .with_doc(
                "https://example.com/ok.xml",
                &leaf(&["https://example.com/a"]),
            )
            .with_doc("https://example.com/broken.xml", "this is not xml at all");
        let resolution = resolver(fetcher, ResolvePolicy::default())
            .resolve("https://example.com/root.xml")
            .await
            .unwrap();

        assert_eq!(resolution.entries.len(), 1);
        assert_eq!(resolution.branch_errors.len(), 1);
        assert!(matches!(
            resolution.branch_errors[0].error,
            SurveyorError::MalformedDocument { .. }
        ));
    }

    #[tokio::test]
    async fn test_root_failure_is_fatal() {
        let fetcher = StubFetcher::new().with_failure("https://example.com/sitemap.xml", 503);
        let result = resolver(fetcher, ResolvePolicy::default())
            .resolve("https://example.com/sitemap.xml")
            .await;

        assert!(matches!(
            result,
            Err(SurveyorError::HttpStatus { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn test_malformed_root_is_fatal() {
        let fetcher =
            StubFetcher::new().with_doc("https://example.com/sitemap.xml", "<html>nope</html>");
        let result = resolver(fetcher, ResolvePolicy::default())
            .resolve("https://example.com/sitemap.xml")
            .await;

        // An html root is classified unknown, not malformed
        assert!(result.is_ok());
        assert!(result.unwrap().entries.is_empty());

        let fetcher = StubFetcher::new().with_doc("https://example.com/sitemap.xml", "<<<garbage");
        let result = resolver(fetcher, ResolvePolicy::default())
            .resolve("https://example.com/sitemap.xml")
            .await;
        assert!(matches!(
            result,
            Err(SurveyorError::MalformedDocument { .. })
        ));
    }

    #[tokio::test]
    async fn test_unknown_root_is_empty_success() {
        let fetcher = StubFetcher::new().with_doc(
            "https://example.com/feed.xml",
            r#"<rss version="2.0"><channel></channel></rss>"#,
        );
        let resolution = resolver(fetcher, ResolvePolicy::default())
            .resolve("https://example.com/feed.xml")
            .await
            .unwrap();

        assert!(resolution.entries.is_empty());
        assert!(resolution.branch_errors.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_root_url_rejected() {
        let fetcher = StubFetcher::new();
        let result = resolver(fetcher, ResolvePolicy::default())
            .resolve("not a url")
            .await;

        assert!(matches!(result, Err(SurveyorError::InvalidUrl { .. })));
    }

    #[tokio::test]
    async fn test_deadline_returns_partial_results() {
        let fetcher = StubFetcher::new()
            .with_doc(
                "https://example.com/root.xml",
                &index(&[
                    "https://example.com/fast.xml",
                    "https://example.com/stuck.xml",
                ]),
            )
            .with_doc(
                "https://example.com/fast.xml",
                &leaf(&["https://example.com/a", "https://example.com/b"]),
            )
            .with_slow_doc(
                "https://example.com/stuck.xml",
                &leaf(&["https://example.com/never"]),
            );
        let policy = ResolvePolicy {
            workers: 1,
            deadline: Some(Duration::from_millis(200)),
            ..Default::default()
        };
        let resolution = resolver(fetcher, policy)
            .resolve("https://example.com/root.xml")
            .await
            .unwrap();

        assert!(resolution.deadline_hit);
        assert_eq!(resolution.entries.len(), 2);
    }
}
