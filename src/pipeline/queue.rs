//! Bounded work queue between the producer and the matcher workers.
//!
//! # Design Decisions
//! - Two counting permits (free slots / queued items) around a mutex-held
//!   buffer; `push` suspends when full, `pop` suspends when empty
//! - Removal order is last-in first-out, a stack. No ordering is
//!   advertised across workers, so the stack discipline is observable
//!   only through worker interleaving; it is documented here rather than
//!   silently normalized to FIFO
//! - Closing the queue makes "no more work will ever arrive" a single
//!   atomic fact: `pop` drains the remaining items, then yields `None`

use std::sync::Arc;

use tokio::sync::{Mutex, Semaphore};

/// Queue capacity: at most this many items are buffered at once.
pub const QUEUE_CAPACITY: usize = 100;

/// A closable, bounded, LIFO work queue.
#[derive(Clone)]
pub struct BoundedWorkQueue {
    inner: Arc<QueueInner>,
}

struct QueueInner {
    /// Permits for free slots; producers acquire one per push.
    free_slots: Semaphore,
    /// Permits for queued items; consumers acquire one per pop.
    queued: Semaphore,
    items: Mutex<Vec<String>>,
}

impl BoundedWorkQueue {
    pub fn new() -> Self {
        Self::with_capacity(QUEUE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Arc::new(QueueInner {
                free_slots: Semaphore::new(capacity),
                queued: Semaphore::new(0),
                items: Mutex::new(Vec::with_capacity(capacity)),
            }),
        }
    }

    /// Insert one item, suspending while the queue is full.
    ///
    /// After `close` (which an aborting consumer may trigger) the item is
    /// dropped; the drop is logged and the producer is not blocked.
    pub async fn push(&self, item: String) {
        let Ok(permit) = self.inner.free_slots.acquire().await else {
            tracing::warn!("work queue closed, dropping item");
            return;
        };
        permit.forget();

        self.inner.items.lock().await.push(item);
        self.inner.queued.add_permits(1);
    }

    /// Remove the most recently inserted item, suspending while the queue
    /// is empty. Returns `None` once the queue is closed and drained.
    pub async fn pop(&self) -> Option<String> {
        match self.inner.queued.acquire().await {
            Ok(permit) => {
                permit.forget();
                let item = self.inner.items.lock().await.pop();
                // Before close, a queued permit always corresponds to a
                // pushed item. After close, a draining consumer may have
                // taken it first; `None` then just means exhaustion.
                self.inner.free_slots.add_permits(1);
                item
            }
            // Closed: drain whatever is left, then report exhaustion.
            Err(_) => self.inner.items.lock().await.pop(),
        }
    }

    /// Signal that no more items will be pushed. Blocked and future `pop`s
    /// drain the remaining items and then return `None`.
    pub fn close(&self) {
        self.inner.queued.close();
        self.inner.free_slots.close();
    }
}

impl Default for BoundedWorkQueue {
    fn default() -> Self {
        Self::new()
    }
}
