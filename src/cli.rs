use clap::Parser;

#[derive(Parser)]
#[command(name = "crawl-lab", about = "Bounded-concurrency web crawler study")]
pub struct Cli {
    /// Path to a TOML config file carrying a [crawl] table.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Seed URL to start crawling from.
    pub seed: Option<String>,

    /// Maximum link-following depth from the seed.
    #[arg(short, long)]
    pub depth: Option<u32>,

    /// Maximum number of pages to crawl.
    #[arg(short = 'p', long)]
    pub max_pages: Option<usize>,

    /// Number of concurrent workers. 1 runs the sequential reference mode.
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Follow links to other domains.
    #[arg(long)]
    pub follow_external: bool,

    /// Print the full crawl result as JSON instead of a summary.
    #[arg(long)]
    pub json: bool,
}
