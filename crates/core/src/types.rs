use serde::{Deserialize, Serialize};

/// One successfully fetched page. Value-typed: once built it is never
/// mutated, only read and cloned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRecord {
    pub url: String,
    pub title: String,
    pub status_code: u16,
    pub content: String,
    pub links: Vec<String>,
}

impl PageRecord {
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        status_code: u16,
        content: impl Into<String>,
        links: Vec<String>,
    ) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            status_code,
            content: content.into(),
            links,
        }
    }
}

/// A frontier entry: a URL awaiting fetch at a known depth from the seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierItem {
    pub url: String,
    pub depth: u32,
}

impl FrontierItem {
    pub fn new(url: impl Into<String>, depth: u32) -> Self {
        Self {
            url: url.into(),
            depth,
        }
    }
}

/// The final, immutable output of one crawl.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlResult {
    pub successful_pages: Vec<PageRecord>,
    pub failed_urls: Vec<String>,
    pub start_time_ms: u64,
    pub end_time_ms: u64,
}

impl CrawlResult {
    pub fn total_pages_crawled(&self) -> usize {
        self.successful_pages.len()
    }

    pub fn total_failures(&self) -> usize {
        self.failed_urls.len()
    }

    pub fn duration_ms(&self) -> u64 {
        self.end_time_ms.saturating_sub(self.start_time_ms)
    }
}

/// Milliseconds since the UNIX epoch, used for [`CrawlResult`]'s wall-clock
/// stamps. A thin wrapper around `SystemTime` so callers don't each reinvent
/// the `UNIX_EPOCH` arithmetic.
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
