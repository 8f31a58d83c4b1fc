//! Bounded FIFO queues for engine input and output
//!
//! Producers and result consumers interact with the engine through these
//! queues without ever blocking: `offer` refuses items beyond capacity and
//! `poll` returns `None` when empty. Only the dispatch loop waits, via the
//! async `take`.

use std::collections::VecDeque;

use parking_lot::Mutex;
use tokio::sync::Notify;

/// Fixed-capacity thread-safe FIFO buffer.
///
/// Exceeding capacity on [`offer`](BoundedQueue::offer) is a normal,
/// reportable condition, not a fault; the rejected item is handed back to the
/// caller untouched.
#[derive(Debug)]
pub struct BoundedQueue<T> {
    items: Mutex<VecDeque<T>>,
    capacity: usize,
    available: Notify,
}

impl<T> BoundedQueue<T> {
    /// Create a queue that holds at most `capacity` items.
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
            available: Notify::new(),
        }
    }

    /// Attempt a non-blocking insert.
    ///
    /// Returns `Err` carrying the item back when the queue is full.
    pub fn offer(&self, item: T) -> Result<(), T> {
        {
            let mut items = self.items.lock();
            if items.len() >= self.capacity {
                return Err(item);
            }
            items.push_back(item);
        }
        self.available.notify_one();
        Ok(())
    }

    /// Non-blocking removal of the oldest item, if any.
    pub fn poll(&self) -> Option<T> {
        self.items.lock().pop_front()
    }

    /// Wait until an item is available and remove it.
    ///
    /// A wakeup that loses the race to another consumer re-arms and waits
    /// again rather than returning; the caller only ever observes an item.
    pub async fn take(&self) -> T {
        loop {
            if let Some(item) = self.poll() {
                return item;
            }
            // notify_one stores a permit when nobody is waiting yet, so an
            // offer landing between the poll above and this await still wakes
            // us immediately.
            self.available.notified().await;
        }
    }

    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
