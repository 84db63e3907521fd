mod cli;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;

// mimalloc keeps memory flat under a worker pool that allocates and frees a
// PageRecord per fetch; glibc's allocator tends to hold onto arena pages
// under that churn.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use crawl_lab_core::CrawlConfig;
use crawl_lab_engine::Engine;
use crawl_lab_fetcher::HttpFetcher;

use crate::cli::Cli;

fn main() -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async_main())
}

async fn async_main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let base = match std::fs::read_to_string(&cli.config) {
        Ok(contents) => CrawlConfig::from_toml_str(&contents)
            .with_context(|| format!("invalid config file at {}", cli.config))?,
        Err(_) => {
            warn!(path = %cli.config, "config file not found, using defaults");
            CrawlConfig::default()
        }
    };

    let seed = cli.seed.as_deref();
    let follow_external_links = cli.follow_external || base.follow_external_links;
    let start_domain = if !follow_external_links && base.start_domain.is_empty() {
        seed.and_then(|s| url::Url::parse(s).ok())
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or(base.start_domain)
    } else {
        base.start_domain
    };

    // Re-run through the builder so CLI overrides go through the same
    // validation the config file did — `--max-pages 0`/`--workers 0` must
    // fail here, not silently bypass the configuration-time contract.
    let config = CrawlConfig::builder()
        .max_depth(cli.depth.unwrap_or(base.max_depth))
        .max_pages(cli.max_pages.unwrap_or(base.max_pages))
        .timeout_ms(base.timeout_ms)
        .follow_external_links(follow_external_links)
        .start_domain(start_domain)
        .worker_count(cli.workers.unwrap_or(base.worker_count))
        .build()
        .context("invalid crawl configuration")?;

    let fetcher: Arc<dyn crawl_lab_fetcher::Fetcher> =
        Arc::new(HttpFetcher::new().context("failed to build http client")?);
    let engine = Engine::new(config, fetcher);
    let result = engine.crawl(seed).await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!(
            "crawled {} pages, {} failures, in {}ms",
            result.total_pages_crawled(),
            result.total_failures(),
            result.duration_ms()
        );
        for page in &result.successful_pages {
            println!("  [{}] {}", page.status_code, page.url);
        }
        for url in &result.failed_urls {
            println!("  [failed] {url}");
        }
    }

    Ok(())
}
