use thiserror::Error;

/// Crate-wide error type. Only [`CrawlError::Configuration`] is ever allowed
/// to escape `Engine::crawl` — every other variant is recorded into a
/// [`crate::CrawlResult`] and absorbed.
#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("invalid crawl configuration: {0}")]
    Configuration(String),

    #[error("fetch failed for {url}: {reason}")]
    Fetch { url: String, reason: String },
}

impl CrawlError {
    pub fn fetch(url: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        CrawlError::Fetch {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}
