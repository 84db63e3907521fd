use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::{info, warn};

use crawl_lab_core::{now_ms, CrawlConfig, CrawlResult, FrontierItem};
use crawl_lab_fetcher::Fetcher;
use crawl_lab_frontier::Frontier;

use crate::accumulator::ResultAccumulator;
use crate::filter::LinkFilter;
use crate::limit::{Admission, LimitController};
use crate::visited::VisitedSet;

/// How long a worker's `frontier.take` waits before re-checking the
/// quiescence predicate (§5). Deliberately much shorter than the teacher's
/// own 2-second idle backoff (`src/crawl.rs`), since this system's
/// termination check needs to react quickly rather than save CPU across a
/// long-lived multi-network crawl.
const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Drives one crawl from a seed URL to a [`CrawlResult`], in either the
/// sequential (single task, deterministic BFS) or parallel (bounded worker
/// pool) mode selected by `config.worker_count`.
///
/// `crawl` is infallible: the only error this system defines —
/// `CrawlError::Configuration` — can only arise while building the
/// `CrawlConfig`, before an `Engine` exists at all.
pub struct Engine {
    config: Arc<CrawlConfig>,
    fetcher: Arc<dyn Fetcher>,
}

impl Engine {
    pub fn new(config: CrawlConfig, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            config: Arc::new(config),
            fetcher,
        }
    }

    pub async fn crawl(&self, seed_url: Option<&str>) -> CrawlResult {
        let start_time_ms = now_ms();
        let accumulator = ResultAccumulator::new();

        let seed = match seed_url {
            None => {
                info!("empty seed url (null)");
                accumulator.record_failure("null".to_string()).await;
                return accumulator.snapshot(start_time_ms).await;
            }
            Some(s) if s.is_empty() => {
                info!("empty seed url");
                accumulator.record_failure(String::new()).await;
                return accumulator.snapshot(start_time_ms).await;
            }
            Some(s) => s,
        };

        let visited = Arc::new(VisitedSet::new());
        let frontier = Arc::new(Frontier::new());
        let accumulator = Arc::new(accumulator);
        let limit = Arc::new(LimitController::new(self.config.max_pages));

        visited.admit(seed);
        frontier.offer(FrontierItem::new(seed, 0)).await;

        if self.config.is_sequential() {
            self.run_sequential(&frontier, &visited, &accumulator, &limit)
                .await;
        } else {
            self.run_parallel(&frontier, &visited, &accumulator, &limit)
                .await;
        }

        accumulator.snapshot(start_time_ms).await
    }

    /// Single-task BFS reference mode: the frontier is drained strictly in
    /// FIFO order, so depth-*d* pages are all fetched before any
    /// depth-*(d+1)* page.
    async fn run_sequential(
        &self,
        frontier: &Frontier,
        visited: &VisitedSet,
        accumulator: &ResultAccumulator,
        limit: &LimitController,
    ) {
        while let Some(item) = frontier.take(Duration::from_millis(0)).await {
            if limit.limit_reached() {
                break;
            }
            self.process_item(item, frontier, visited, accumulator, limit)
                .await;
        }
    }

    /// Bounded worker pool mode. Termination is the joint predicate
    /// `active == 0 AND frontier is empty`, re-evaluated only when a
    /// worker's `take` times out — an empty frontier observed while another
    /// worker is mid-fetch is not, by itself, quiescence (§4.8).
    async fn run_parallel(
        &self,
        frontier: &Arc<Frontier>,
        visited: &Arc<VisitedSet>,
        accumulator: &Arc<ResultAccumulator>,
        limit: &Arc<LimitController>,
    ) {
        let active = Arc::new(AtomicUsize::new(0));
        let limit_reached = Arc::new(AtomicBool::new(false));

        let mut handles = Vec::with_capacity(self.config.worker_count);
        for worker_id in 0..self.config.worker_count {
            let frontier = Arc::clone(frontier);
            let visited = Arc::clone(visited);
            let accumulator = Arc::clone(accumulator);
            let limit = Arc::clone(limit);
            let active = Arc::clone(&active);
            let limit_reached = Arc::clone(&limit_reached);
            let config = Arc::clone(&self.config);
            let fetcher = Arc::clone(&self.fetcher);

            handles.push(tokio::spawn(async move {
                worker_loop(
                    worker_id,
                    config,
                    fetcher,
                    frontier,
                    visited,
                    accumulator,
                    limit,
                    active,
                    limit_reached,
                )
                .await;
            }));
        }

        for result in join_all(handles).await {
            if let Err(e) = result {
                warn!("worker task panicked: {e}");
            }
        }
    }

    /// Fetch one item and, on success, apply the limit controller ritual
    /// and enqueue admissible children (§4.7, §4.8). Shared between
    /// sequential and parallel mode.
    async fn process_item(
        &self,
        item: FrontierItem,
        frontier: &Frontier,
        visited: &VisitedSet,
        accumulator: &ResultAccumulator,
        limit: &LimitController,
    ) {
        match self.fetcher.fetch(&item.url, self.config.timeout_ms).await {
            Ok(page) => {
                if limit.try_admit() == Admission::LimitReached {
                    return;
                }
                let links = page.links.clone();
                accumulator.record_success(page).await;

                if item.depth < self.config.max_depth && !limit.limit_reached() {
                    for link in links {
                        if LinkFilter::admit(&link, &self.config) && visited.admit(&link) {
                            frontier.offer(FrontierItem::new(link, item.depth + 1)).await;
                        }
                    }
                }
            }
            Err(_) => {
                accumulator.record_failure(item.url).await;
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
async fn worker_loop(
    worker_id: usize,
    config: Arc<CrawlConfig>,
    fetcher: Arc<dyn Fetcher>,
    frontier: Arc<Frontier>,
    visited: Arc<VisitedSet>,
    accumulator: Arc<ResultAccumulator>,
    limit: Arc<LimitController>,
    active: Arc<AtomicUsize>,
    limit_reached: Arc<AtomicBool>,
) {
    loop {
        if limit_reached.load(Ordering::SeqCst) {
            break;
        }

        let Some(item) = frontier.take(POLL_TIMEOUT).await else {
            if active.load(Ordering::SeqCst) == 0 && frontier.is_empty().await {
                break;
            }
            continue;
        };

        active.fetch_add(1, Ordering::SeqCst);

        if limit.limit_reached() {
            limit_reached.store(true, Ordering::SeqCst);
            active.fetch_sub(1, Ordering::SeqCst);
            break;
        }

        match fetcher.fetch(&item.url, config.timeout_ms).await {
            Ok(page) => {
                if limit.try_admit() == Admission::LimitReached {
                    limit_reached.store(true, Ordering::SeqCst);
                } else {
                    let links = page.links.clone();
                    accumulator.record_success(page).await;

                    if item.depth < config.max_depth && !limit.limit_reached() {
                        for link in links {
                            if LinkFilter::admit(&link, &config) && visited.admit(&link) {
                                frontier
                                    .offer(FrontierItem::new(link, item.depth + 1))
                                    .await;
                            }
                        }
                    } else if limit.limit_reached() {
                        limit_reached.store(true, Ordering::SeqCst);
                    }
                }
            }
            Err(_) => {
                accumulator.record_failure(item.url).await;
            }
        }

        active.fetch_sub(1, Ordering::SeqCst);
        tracing::trace!(worker_id, "idle");
    }
}
