pub mod config;
pub mod error;
pub mod normalize;
pub mod types;

pub use config::{CrawlConfig, CrawlConfigBuilder};
pub use error::CrawlError;
pub use normalize::normalize;
pub use types::*;
