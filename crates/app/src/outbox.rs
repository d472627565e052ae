//! In-process outgoing message queue.
//!
//! A bounded FIFO shared by every producer (dispatcher and updater) and
//! drained by a single writer. When full, the **oldest** pending message is
//! overwritten: producers never block and the queue never grows.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use bytes::Bytes;
use tokio::sync::Notify;

/// Default number of pending messages kept before the oldest is dropped.
pub const DEFAULT_CAPACITY: usize = 100;

struct Inner {
    messages: VecDeque<Bytes>,
    closed: bool,
}

/// Ring buffer of encoded messages with an async, single-consumer drain.
pub struct Outbox {
    inner: Mutex<Inner>,
    capacity: usize,
    ready: Notify,
}

impl Outbox {
    /// Create an outbox holding at most `capacity` pending messages.
    ///
    /// A zero capacity is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Mutex::new(Inner {
                messages: VecDeque::with_capacity(capacity),
                closed: false,
            }),
            capacity,
            ready: Notify::new(),
        }
    }

    /// Append a message without ever blocking.
    ///
    /// Returns the message that was dropped to make room, if the queue was
    /// full.
    pub fn push(&self, message: Bytes) -> Option<Bytes> {
        let dropped = {
            let mut inner = self.lock();
            let dropped = if inner.messages.len() >= self.capacity {
                inner.messages.pop_front()
            } else {
                None
            };
            inner.messages.push_back(message);
            dropped
        };
        self.ready.notify_one();
        dropped
    }

    /// Wait for and remove the oldest pending message.
    ///
    /// Returns `None` once the outbox is closed and everything queued before
    /// closing has been drained.
    pub async fn drain(&self) -> Option<Bytes> {
        loop {
            {
                let mut inner = self.lock();
                if let Some(message) = inner.messages.pop_front() {
                    return Some(message);
                }
                if inner.closed {
                    return None;
                }
            }
            self.ready.notified().await;
        }
    }

    /// Mark the outbox closed and wake the consumer, which returns once the
    /// remaining messages are drained.
    pub fn close(&self) {
        self.lock().closed = true;
        self.ready.notify_one();
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Outbox {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl std::fmt::Debug for Outbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Outbox")
            .field("len", &self.lock().messages.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;

    impl Outbox {
        fn try_pop(&self) -> Option<Bytes> {
            self.lock().messages.pop_front()
        }

        fn len(&self) -> usize {
            self.lock().messages.len()
        }
    }

    fn msg(n: usize) -> Bytes {
        Bytes::from(format!("message {n}"))
    }

    #[test]
    fn should_keep_fifo_order() {
        let outbox = Outbox::new(4);
        outbox.push(msg(1));
        outbox.push(msg(2));
        assert_eq!(outbox.try_pop(), Some(msg(1)));
        assert_eq!(outbox.try_pop(), Some(msg(2)));
        assert_eq!(outbox.try_pop(), None);
    }

    #[test]
    fn should_overwrite_oldest_when_full() {
        let outbox = Outbox::new(100);
        for n in 1..=100 {
            assert_eq!(outbox.push(msg(n)), None);
        }
        assert_eq!(outbox.push(msg(101)), Some(msg(1)));
        assert_eq!(outbox.len(), 100);

        let drained: Vec<_> = std::iter::from_fn(|| outbox.try_pop()).collect();
        let expected: Vec<_> = (2..=101).map(msg).collect();
        assert_eq!(drained, expected);
    }

    #[test]
    fn should_raise_zero_capacity_to_one() {
        let outbox = Outbox::new(0);
        assert_eq!(outbox.capacity, 1);
        outbox.push(msg(1));
        assert_eq!(outbox.push(msg(2)), Some(msg(1)));
    }

    #[test]
    fn should_default_to_hundred_messages() {
        let outbox = Outbox::default();
        assert_eq!(outbox.capacity, DEFAULT_CAPACITY);
        assert_eq!(outbox.len(), 0);
    }

    #[tokio::test]
    async fn should_return_pending_message_without_waiting() {
        let outbox = Outbox::new(4);
        outbox.push(msg(7));
        assert_eq!(outbox.drain().await, Some(msg(7)));
    }

    #[tokio::test(start_paused = true)]
    async fn should_wake_waiting_consumer_on_push() {
        let outbox = Arc::new(Outbox::new(4));
        let consumer = {
            let outbox = Arc::clone(&outbox);
            tokio::spawn(async move { outbox.drain().await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        outbox.push(msg(3));
        assert_eq!(consumer.await.unwrap(), Some(msg(3)));
    }

    #[tokio::test]
    async fn should_drain_remaining_messages_after_close() {
        let outbox = Outbox::new(4);
        outbox.push(msg(1));
        outbox.close();
        assert_eq!(outbox.drain().await, Some(msg(1)));
        assert_eq!(outbox.drain().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn should_release_waiting_consumer_on_close() {
        let outbox = Arc::new(Outbox::new(4));
        let consumer = {
            let outbox = Arc::clone(&outbox);
            tokio::spawn(async move { outbox.drain().await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        outbox.close();
        assert_eq!(consumer.await.unwrap(), None);
    }
}
