use std::sync::atomic::{AtomicUsize, Ordering};

/// Outcome of the admission ritual in [`LimitController::try_admit`].
#[derive(Debug, PartialEq, Eq)]
pub enum Admission {
    /// The caller may record this page; the running count now includes it.
    Admitted,
    /// `max_pages` is already reached; the caller must drop this page and
    /// stop enqueuing its children.
    LimitReached,
}

/// Enforces `|successful_pages| <= max_pages` exactly under concurrent
/// success reports (§4.7). The increment-then-rollback protocol is the part
/// that matters: a naive check-then-increment lets up to `worker_count - 1`
/// pages slip past the boundary, which is the bug this design explicitly
/// rejects.
pub struct LimitController {
    crawled: AtomicUsize,
    max_pages: usize,
}

impl LimitController {
    pub fn new(max_pages: usize) -> Self {
        Self {
            crawled: AtomicUsize::new(0),
            max_pages,
        }
    }

    /// Call after a fetch succeeds, before recording the page.
    pub fn try_admit(&self) -> Admission {
        let new = self.crawled.fetch_add(1, Ordering::SeqCst) + 1;
        if new > self.max_pages {
            self.crawled.fetch_sub(1, Ordering::SeqCst);
            Admission::LimitReached
        } else {
            Admission::Admitted
        }
    }

    pub fn crawled(&self) -> usize {
        self.crawled.load(Ordering::SeqCst)
    }

    pub fn limit_reached(&self) -> bool {
        self.crawled() >= self.max_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn admits_up_to_exactly_the_limit() {
        let controller = LimitController::new(2);
        assert_eq!(controller.try_admit(), Admission::Admitted);
        assert_eq!(controller.try_admit(), Admission::Admitted);
        assert_eq!(controller.try_admit(), Admission::LimitReached);
        assert_eq!(controller.crawled(), 2);
    }

    #[test]
    fn rollback_keeps_count_exact_after_rejection() {
        let controller = LimitController::new(1);
        assert_eq!(controller.try_admit(), Admission::Admitted);
        for _ in 0..10 {
            assert_eq!(controller.try_admit(), Admission::LimitReached);
        }
        assert_eq!(controller.crawled(), 1);
    }

    #[test]
    fn exact_enforcement_under_concurrency() {
        let controller = Arc::new(LimitController::new(5));
        let mut handles = Vec::new();
        for _ in 0..50 {
            let controller = Arc::clone(&controller);
            handles.push(std::thread::spawn(move || controller.try_admit()));
        }
        let admitted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|a| *a == Admission::Admitted)
            .count();
        assert_eq!(admitted, 5);
        assert_eq!(controller.crawled(), 5);
    }
}
