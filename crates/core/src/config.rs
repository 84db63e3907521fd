use serde::Deserialize;

use crate::error::CrawlError;

/// Immutable crawl configuration. Built once, through [`CrawlConfigBuilder`],
/// which is the only place invalid values are rejected — after construction
/// every field is load-bearing and trusted by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    pub max_depth: u32,
    pub max_pages: usize,
    pub timeout_ms: u64,
    pub follow_external_links: bool,
    pub start_domain: String,
    pub worker_count: usize,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            max_pages: 100,
            timeout_ms: 10_000,
            follow_external_links: false,
            start_domain: String::new(),
            worker_count: 1,
        }
    }
}

impl CrawlConfig {
    pub fn builder() -> CrawlConfigBuilder {
        CrawlConfigBuilder::default()
    }

    fn validate(&self) -> Result<(), CrawlError> {
        if self.max_pages == 0 {
            return Err(CrawlError::Configuration(
                "max_pages must be greater than zero".into(),
            ));
        }
        if self.timeout_ms == 0 {
            return Err(CrawlError::Configuration(
                "timeout_ms must be greater than zero".into(),
            ));
        }
        if self.worker_count == 0 {
            return Err(CrawlError::Configuration(
                "worker_count must be at least one".into(),
            ));
        }
        Ok(())
    }

    /// Parse and validate from a TOML document carrying a `[crawl]` table.
    pub fn from_toml_str(s: &str) -> Result<Self, CrawlError> {
        #[derive(Deserialize)]
        struct Document {
            #[serde(default)]
            crawl: CrawlConfig,
        }
        let doc: Document = toml::from_str(s)
            .map_err(|e| CrawlError::Configuration(format!("invalid config file: {e}")))?;
        doc.crawl.validate()?;
        Ok(doc.crawl)
    }

    /// True if `worker_count == 1`, the sequential reference mode.
    pub fn is_sequential(&self) -> bool {
        self.worker_count == 1
    }
}

/// Builder that enforces §6's configuration-time validation: `max_pages`,
/// `timeout_ms`, and `worker_count` must all be nonzero. An empty
/// `start_domain` is legal even with `follow_external_links = false` — it
/// just means `LinkFilter::admit`'s `link.contains("")` always holds, so
/// the same-domain policy quietly becomes "follow everything".
#[derive(Debug, Clone, Default)]
pub struct CrawlConfigBuilder {
    config: CrawlConfig,
}

impl CrawlConfigBuilder {
    pub fn max_depth(mut self, max_depth: u32) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    pub fn max_pages(mut self, max_pages: usize) -> Self {
        self.config.max_pages = max_pages;
        self
    }

    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.config.timeout_ms = timeout_ms;
        self
    }

    pub fn follow_external_links(mut self, follow: bool) -> Self {
        self.config.follow_external_links = follow;
        self
    }

    pub fn start_domain(mut self, start_domain: impl Into<String>) -> Self {
        self.config.start_domain = start_domain.into();
        self
    }

    pub fn worker_count(mut self, worker_count: usize) -> Self {
        self.config.worker_count = worker_count;
        self
    }

    pub fn build(self) -> Result<CrawlConfig, CrawlError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_max_pages() {
        let err = CrawlConfig::builder()
            .start_domain("localhost")
            .max_pages(0)
            .build()
            .unwrap_err();
        assert!(matches!(err, CrawlError::Configuration(_)));
    }

    #[test]
    fn rejects_zero_timeout() {
        let err = CrawlConfig::builder()
            .start_domain("localhost")
            .timeout_ms(0)
            .build()
            .unwrap_err();
        assert!(matches!(err, CrawlError::Configuration(_)));
    }

    #[test]
    fn rejects_zero_workers() {
        let err = CrawlConfig::builder()
            .start_domain("localhost")
            .worker_count(0)
            .build()
            .unwrap_err();
        assert!(matches!(err, CrawlError::Configuration(_)));
    }

    #[test]
    fn accepts_external_links_without_domain() {
        let config = CrawlConfig::builder()
            .follow_external_links(true)
            .build()
            .unwrap();
        assert!(config.follow_external_links);
    }

    #[test]
    fn accepts_empty_domain_with_external_links_disabled() {
        // Same-domain policy with nothing to match against degrades to
        // "follow everything" rather than being rejected at build time.
        let config = CrawlConfig::builder().build().unwrap();
        assert!(!config.follow_external_links);
        assert!(config.start_domain.is_empty());
    }

    #[test]
    fn shipped_default_config_file_parses_and_validates() {
        let toml_str = include_str!("../../../config/default.toml");
        let config = CrawlConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config, CrawlConfig::default());
    }

    #[test]
    fn worker_count_one_is_sequential() {
        let config = CrawlConfig::builder()
            .start_domain("localhost")
            .worker_count(1)
            .build()
            .unwrap();
        assert!(config.is_sequential());
    }

    #[test]
    fn parses_toml() {
        let toml_str = r#"
            [crawl]
            max_depth = 3
            max_pages = 50
            timeout_ms = 5000
            follow_external_links = false
            start_domain = "example.com"
            worker_count = 4
        "#;
        let config = CrawlConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.worker_count, 4);
    }
}
