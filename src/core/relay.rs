use crate::domain::ports::EventStream;
use crate::utils::lock_unpoisoned;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc::{self, UnboundedSender};

/// Publish relay: a hot, multi-subscriber event source with no replay.
///
/// Every subscriber receives each value accepted after it subscribed, in
/// acceptance order. Subscribers whose receiver was dropped are pruned on the
/// next `accept`.
pub struct Relay<T> {
    subscribers: Arc<Mutex<Vec<UnboundedSender<T>>>>,
}

impl<T: Clone + Send + 'static> Relay<T> {
    pub fn new() -> Self {
        Self {
            subscribers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn subscribe(&self) -> EventStream<T> {
        self.subscribe_with(std::iter::empty())
    }

    /// Subscribe and receive `backlog` before any value accepted afterwards.
    pub fn subscribe_with(&self, backlog: impl IntoIterator<Item = T>) -> EventStream<T> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut subscribers = self.lock();
        for value in backlog {
            // 接收端尚在手上，不會失敗
            let _ = tx.send(value);
        }
        subscribers.push(tx);
        rx
    }

    /// Push a value to all live subscribers. Returns how many received it.
    pub fn accept(&self, value: T) -> usize {
        let mut subscribers = self.lock();
        subscribers.retain(|tx| tx.send(value.clone()).is_ok());
        subscribers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        let mut subscribers = self.lock();
        subscribers.retain(|tx| !tx.is_closed());
        subscribers.len()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<UnboundedSender<T>>> {
        lock_unpoisoned(&self.subscribers)
    }
}

impl<T: Clone + Send + 'static> Default for Relay<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Relay<T> {
    fn clone(&self) -> Self {
        Self {
            subscribers: Arc::clone(&self.subscribers),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_pending, assert_ready_eq, task};

    #[test]
    fn test_accept_reaches_every_subscriber_in_order() {
        let relay = Relay::new();
        let mut first = relay.subscribe();
        let mut second = relay.subscribe();

        assert_eq!(relay.accept(1), 2);
        assert_eq!(relay.accept(2), 2);

        assert_eq!(first.try_recv().ok(), Some(1));
        assert_eq!(first.try_recv().ok(), Some(2));
        assert_eq!(second.try_recv().ok(), Some(1));
        assert_eq!(second.try_recv().ok(), Some(2));
    }

    #[test]
    fn test_no_replay_for_late_subscribers() {
        let relay = Relay::new();
        relay.accept("early");

        let mut late = relay.subscribe();
        let mut recv = task::spawn(late.recv());
        assert_pending!(recv.poll());

        relay.accept("late");
        assert!(recv.is_woken());
        assert_ready_eq!(recv.poll(), Some("late"));
    }

    #[test]
    fn test_backlog_precedes_later_values() {
        let relay = Relay::new();
        let mut rx = relay.subscribe_with(vec!["a", "b"]);
        relay.accept("c");

        assert_eq!(rx.try_recv().ok(), Some("a"));
        assert_eq!(rx.try_recv().ok(), Some("b"));
        assert_eq!(rx.try_recv().ok(), Some("c"));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_dropped_subscribers_are_pruned() {
        let relay = Relay::new();
        let kept = relay.subscribe();
        let dropped = relay.subscribe();
        drop(dropped);

        assert_eq!(relay.subscriber_count(), 1);
        assert_eq!(relay.accept(7u8), 1);
        drop(kept);
        assert_eq!(relay.accept(8u8), 0);
    }
}
