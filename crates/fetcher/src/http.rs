use std::time::{Duration, Instant};

use async_trait::async_trait;
use scraper::{Html, Selector};
use tracing::{debug, warn};
use url::Url;

use crawl_lab_core::{CrawlError, PageRecord};

use crate::Fetcher;

/// 1 MiB — matches the spec's default body cap (§6).
const MAX_BODY_SIZE: usize = 1024 * 1024;

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// The crate's one concrete [`Fetcher`]: plain HTTP(S) GET via `reqwest`,
/// redirects followed, body capped at [`MAX_BODY_SIZE`], links extracted
/// from `<a href>` with `scraper` — the same split the teacher's
/// `NetworkDriver` + `parser::html` pair uses, collapsed into a single type
/// since there is only one transport here.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, CrawlError> {
        let client = reqwest::Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| CrawlError::Configuration(format!("failed to build http client: {e}")))?;
        Ok(Self { client })
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new().expect("default reqwest client configuration is always valid")
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, timeout_ms: u64) -> Result<PageRecord, CrawlError> {
        let start = Instant::now();
        debug!(url, "fetching");

        let resp = tokio::time::timeout(
            Duration::from_millis(timeout_ms),
            self.client.get(url).send(),
        )
        .await
        .map_err(|_| CrawlError::fetch(url, format!("timed out after {timeout_ms}ms")))?
        .map_err(|e| CrawlError::fetch(url, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CrawlError::fetch(url, format!("status {status}")));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| CrawlError::fetch(url, e))?;
        if body.len() > MAX_BODY_SIZE {
            return Err(CrawlError::fetch(
                url,
                format!("body too large: {} bytes (max {MAX_BODY_SIZE})", body.len()),
            ));
        }

        let html = String::from_utf8_lossy(&body);
        let base = Url::parse(url).map_err(|e| CrawlError::fetch(url, e))?;
        let (title, content, links) = parse_page(&html, &base);

        debug!(
            url,
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            links = links.len(),
            "fetched"
        );

        Ok(PageRecord::new(
            url,
            title,
            status.as_u16(),
            content,
            links,
        ))
    }
}

fn parse_page(html: &str, base: &Url) -> (String, String, Vec<String>) {
    let document = Html::parse_document(html);

    let title = select_one(&document, "title")
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let content = select_one(&document, "body")
        .map(|el| {
            el.text()
                .collect::<Vec<_>>()
                .join(" ")
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_default();

    let links = extract_links(&document, base);

    (title, content, links)
}

fn select_one<'a>(document: &'a Html, selector: &str) -> Option<scraper::ElementRef<'a>> {
    Selector::parse(selector)
        .ok()
        .and_then(|s| document.select(&s).next())
}

/// Absolute `http(s)` links in document order, anchors resolved against
/// `base`. Duplicates are preserved — deduplication is the visited set's
/// responsibility, not the fetcher's (§4.3).
fn extract_links(document: &Html, base: &Url) -> Vec<String> {
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|el| {
            let href = el.value().attr("href")?;
            if href.starts_with('#')
                || href.starts_with("javascript:")
                || href.starts_with("mailto:")
                || href.starts_with("tel:")
            {
                return None;
            }
            let resolved = base.join(href).ok()?;
            if resolved.scheme() == "http" || resolved.scheme() == "https" {
                Some(resolved.to_string())
            } else {
                None
            }
        })
        .collect()
}
