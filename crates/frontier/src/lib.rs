use std::collections::VecDeque;
use std::time::Duration;

use tokio::sync::{Mutex, Notify};
use tracing::trace;

use crawl_lab_core::FrontierItem;

/// Holding area of `(url, depth)` items awaiting fetch. Many producers
/// enqueue discovered children; many consumers pop the next item to fetch.
///
/// FIFO in both sequential and parallel mode: sequential mode relies on the
/// FIFO order for deterministic BFS (§5), and parallel mode does not require
/// any particular order, so the simplest correct queue serves both — a
/// single shared `Mutex<VecDeque<_>>` instead of the teacher's per-network
/// queue map, since this system has no per-network partitioning. The
/// `Notify`-based wait in `take` is new: the teacher has no `Notify` and
/// falls back to a flat sleep-and-repoll on an empty queue.
pub struct Frontier {
    items: Mutex<VecDeque<FrontierItem>>,
    notify: Notify,
}

impl Default for Frontier {
    fn default() -> Self {
        Self::new()
    }
}

impl Frontier {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
            notify: Notify::new(),
        }
    }

    /// Enqueue an item. Never blocks (the lock is held only for the push).
    pub async fn offer(&self, item: FrontierItem) {
        trace!(url = %item.url, depth = item.depth, "frontier: offer");
        self.items.lock().await.push_back(item);
        self.notify.notify_one();
    }

    /// Return the next item, or `None` if nothing arrived within `timeout` —
    /// the caller re-checks the quiescence predicate on `None` rather than
    /// treating it as "frontier permanently empty".
    pub async fn take(&self, timeout: Duration) -> Option<FrontierItem> {
        if let Some(item) = self.try_take().await {
            return Some(item);
        }

        let wait = self.notify.notified();
        tokio::select! {
            _ = wait => self.try_take().await,
            _ = tokio::time::sleep(timeout) => None,
        }
    }

    async fn try_take(&self) -> Option<FrontierItem> {
        self.items.lock().await.pop_front()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.lock().await.is_empty()
    }

    pub async fn len(&self) -> usize {
        self.items.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn offer_then_take_is_fifo() {
        let frontier = Frontier::new();
        frontier.offer(FrontierItem::new("http://a", 0)).await;
        frontier.offer(FrontierItem::new("http://b", 1)).await;

        let first = frontier.take(Duration::from_millis(50)).await.unwrap();
        let second = frontier.take(Duration::from_millis(50)).await.unwrap();
        assert_eq!(first.url, "http://a");
        assert_eq!(second.url, "http://b");
    }

    #[tokio::test]
    async fn take_times_out_on_empty_queue() {
        let frontier = Frontier::new();
        let result = frontier.take(Duration::from_millis(20)).await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn take_wakes_up_on_concurrent_offer() {
        let frontier = Arc::new(Frontier::new());
        let producer = Arc::clone(&frontier);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            producer.offer(FrontierItem::new("http://late", 0)).await;
        });

        let item = frontier.take(Duration::from_secs(1)).await;
        assert_eq!(item.unwrap().url, "http://late");
    }

    #[tokio::test]
    async fn is_empty_reflects_queue_state() {
        let frontier = Frontier::new();
        assert!(frontier.is_empty().await);
        frontier.offer(FrontierItem::new("http://a", 0)).await;
        assert!(!frontier.is_empty().await);
        assert_eq!(frontier.len().await, 1);
    }
}
