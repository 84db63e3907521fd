pub mod http;

pub use http::HttpFetcher;

use async_trait::async_trait;
use crawl_lab_core::{CrawlError, PageRecord};

/// External collaborator the engine consumes through one operation: turn a
/// URL into a [`PageRecord`] or a terminal [`CrawlError::Fetch`]. The engine
/// never inspects how a `Fetcher` gets its bytes — HTTP, a mock, a replay
/// fixture — only that it upholds these guarantees:
///
/// - success implies `status_code` is in `200..=299`
/// - links are absolute `http(s)` URLs, in page order, not deduplicated
/// - safe to call concurrently from many worker tasks
#[async_trait]
pub trait Fetcher: Send + Sync + 'static {
    async fn fetch(&self, url: &str, timeout_ms: u64) -> Result<PageRecord, CrawlError>;
}
