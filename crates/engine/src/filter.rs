use crawl_lab_core::CrawlConfig;

/// Same-domain and scheme policy applied to a child link before it is even
/// offered to the visited set. Scheme validity (`http`/`https`) is already
/// guaranteed by the fetcher's link extraction — this only applies the
/// domain policy.
pub struct LinkFilter;

impl LinkFilter {
    /// Substring match against `config.start_domain`, intentionally — see
    /// the design notes on why this is preserved rather than tightened to
    /// host equality.
    pub fn admit(link: &str, config: &CrawlConfig) -> bool {
        if config.follow_external_links {
            return true;
        }
        link.contains(&config.start_domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(follow_external: bool, domain: &str) -> CrawlConfig {
        CrawlConfig::builder()
            .follow_external_links(follow_external)
            .start_domain(domain)
            .build()
            .unwrap()
    }

    #[test]
    fn admits_everything_when_following_external_links() {
        let config = config(true, "localhost");
        assert!(LinkFilter::admit("http://anywhere.example/", &config));
    }

    #[test]
    fn admits_matching_domain() {
        let config = config(false, "localhost");
        assert!(LinkFilter::admit("http://localhost:8080/a", &config));
    }

    #[test]
    fn rejects_non_matching_domain() {
        let config = config(false, "localhost");
        assert!(!LinkFilter::admit("http://other.example/a", &config));
    }

    #[test]
    fn substring_match_over_admits_lookalikes() {
        // Documented, deliberate looseness: "evil-localhost.com" contains
        // "localhost" as a substring.
        let config = config(false, "localhost");
        assert!(LinkFilter::admit("http://evil-localhost.com/", &config));
    }
}
