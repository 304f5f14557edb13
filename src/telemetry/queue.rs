//! Bounded FIFO between the tree owner and a presentation consumer
//!
//! The owner publishes one rotated-pair snapshot per mutation that rotated.
//! A consumer drains at its own cadence and falls back to
//! [`Highlight::Clear`] whenever the queue is empty.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::RotatedPair;
use crate::TreeError;

/// What a consumer should highlight after one poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Highlight<K> {
    /// The two nodes of a published rotation
    Pair(RotatedPair<K>),
    /// Nothing pending: show no highlight
    Clear,
}

impl<K> Default for Highlight<K> {
    fn default() -> Self {
        Highlight::Clear
    }
}

impl<K> Highlight<K> {
    /// The pair, if any
    pub fn pair(&self) -> Option<&RotatedPair<K>> {
        match self {
            Highlight::Pair(pair) => Some(pair),
            Highlight::Clear => None,
        }
    }

    /// Nothing to highlight
    pub fn is_clear(&self) -> bool {
        matches!(self, Highlight::Clear)
    }
}

#[derive(Debug)]
struct Shared<K> {
    pending: Mutex<VecDeque<RotatedPair<K>>>,
    capacity: usize,
    dropped: AtomicU64,
}

/// Cloneable handle to one bounded highlight queue
#[derive(Debug)]
pub struct HighlightQueue<K> {
    shared: Arc<Shared<K>>,
}

impl<K> Clone for HighlightQueue<K> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<K> HighlightQueue<K> {
    /// Create a queue holding at most `capacity` snapshots
    pub fn with_capacity(capacity: usize) -> Result<Self, TreeError> {
        if capacity == 0 {
            return Err(TreeError::InvalidConfiguration(
                "highlight queue capacity must be > 0".to_string(),
            ));
        }
        Ok(Self {
            shared: Arc::new(Shared {
                pending: Mutex::new(VecDeque::with_capacity(capacity)),
                capacity,
                dropped: AtomicU64::new(0),
            }),
        })
    }

    // A panicking consumer cannot leave the deque half-updated, so a
    // poisoned lock still guards a valid queue.
    fn lock(&self) -> MutexGuard<'_, VecDeque<RotatedPair<K>>> {
        self.shared
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Enqueue a snapshot without blocking.
    ///
    /// Fails with [`TreeError::QueueFull`] when the consumer has fallen
    /// `capacity` snapshots behind; the snapshot is discarded and counted.
    pub fn publish(&self, pair: RotatedPair<K>) -> Result<(), TreeError> {
        let mut pending = self.lock();
        if pending.len() >= self.shared.capacity {
            drop(pending);
            self.shared.dropped.fetch_add(1, Ordering::Relaxed);
            return Err(TreeError::QueueFull {
                capacity: self.shared.capacity,
            });
        }
        pending.push_back(pair);
        Ok(())
    }

    /// Take the oldest snapshot, or [`Highlight::Clear`] when starved
    pub fn poll(&self) -> Highlight<K> {
        self.lock()
            .pop_front()
            .map_or(Highlight::Clear, Highlight::Pair)
    }

    /// Take every pending snapshot, oldest first
    pub fn drain(&self) -> Vec<RotatedPair<K>> {
        self.lock().drain(..).collect()
    }

    /// Snapshots waiting to be polled
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// No snapshots pending
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Maximum number of pending snapshots
    pub fn capacity(&self) -> usize {
        self.shared.capacity
    }

    /// Snapshots rejected because the queue was full
    pub fn dropped(&self) -> u64 {
        self.shared.dropped.load(Ordering::Relaxed)
    }
}
