use tokio::sync::Mutex;

use crawl_lab_core::{now_ms, CrawlResult, PageRecord};

/// Append-only record of what the crawl produced. Successes and failures
/// each keep insertion order; `snapshot` is only ever called once, after
/// termination, to produce the immutable [`CrawlResult`].
#[derive(Default)]
pub struct ResultAccumulator {
    successful: Mutex<Vec<PageRecord>>,
    failed: Mutex<Vec<String>>,
}

impl ResultAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn record_success(&self, page: PageRecord) {
        self.successful.lock().await.push(page);
    }

    pub async fn record_failure(&self, url: String) {
        self.failed.lock().await.push(url);
    }

    pub async fn snapshot(&self, start_time_ms: u64) -> CrawlResult {
        CrawlResult {
            successful_pages: self.successful.lock().await.clone(),
            failed_urls: self.failed.lock().await.clone(),
            start_time_ms,
            end_time_ms: now_ms().max(start_time_ms),
        }
    }
}
