//! Bounded multi-producer, single-consumer FIFO
//!
//! The closed flag is stored under the same mutex as the items, so a producer
//! can never observe "open", then have its record slip in after the consumer
//! has finished draining.

use super::error::{LoggerError, Result};
use super::overflow_policy::OverflowPolicy;
use parking_lot::{Condvar, Mutex, MutexGuard};
use std::collections::VecDeque;

/// Default queue capacity
pub const DEFAULT_CAPACITY: usize = 100;

/// What happened to a pushed item
#[derive(Debug, PartialEq, Eq)]
pub enum Admission<T> {
    /// Queued without waiting
    Queued,
    /// Queued after blocking on a full queue
    QueuedAfterWait,
    /// Queue was full and the incoming item was discarded (`DropNewest`)
    Rejected(T),
    /// Queued by evicting the oldest unpinned item (`DropOldest`)
    Evicted(T),
}

fn never_pinned<T>(_: &T) -> bool {
    false
}

struct QueueState<T> {
    items: VecDeque<T>,
    closed: bool,
}

pub struct MessageQueue<T> {
    state: Mutex<QueueState<T>>,
    not_empty: Condvar,
    not_full: Condvar,
    capacity: usize,
    policy: OverflowPolicy,
    pinned: fn(&T) -> bool,
}

impl<T> MessageQueue<T> {
    pub fn new(capacity: usize, policy: OverflowPolicy) -> Result<Self> {
        if capacity == 0 {
            return Err(LoggerError::config(
                "MessageQueue",
                "capacity must be greater than zero",
            ));
        }

        Ok(Self {
            state: Mutex::new(QueueState {
                items: VecDeque::with_capacity(capacity),
                closed: false,
            }),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            capacity,
            policy,
            pinned: never_pinned,
        })
    }

    /// Mark items that `DropOldest` must never evict.
    ///
    /// When every queued item is pinned, the incoming item waits for space instead.
    #[must_use]
    pub fn with_pinned(mut self, pinned: fn(&T) -> bool) -> Self {
        self.pinned = pinned;
        self
    }

    /// Append an item, applying the overflow policy when full.
    ///
    /// Fails with [`LoggerError::LoggerStopped`] once the queue is closed,
    /// including for producers that were blocked waiting for space.
    pub fn push(&self, item: T) -> Result<Admission<T>> {
        self.push_with(item, self.policy)
    }

    /// Append an item, blocking while full regardless of the configured policy
    pub fn push_blocking(&self, item: T) -> Result<Admission<T>> {
        self.push_with(item, OverflowPolicy::Block)
    }

    fn push_with(&self, item: T, policy: OverflowPolicy) -> Result<Admission<T>> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(LoggerError::LoggerStopped);
        }

        let mut admission = Admission::Queued;
        if state.items.len() >= self.capacity {
            match policy {
                OverflowPolicy::Block => {
                    self.wait_for_space(&mut state)?;
                    admission = Admission::QueuedAfterWait;
                }
                OverflowPolicy::DropNewest => return Ok(Admission::Rejected(item)),
                OverflowPolicy::DropOldest => {
                    let victim = state.items.iter().position(|queued| !(self.pinned)(queued));
                    match victim.and_then(|index| state.items.remove(index)) {
                        Some(oldest) => admission = Admission::Evicted(oldest),
                        None => {
                            self.wait_for_space(&mut state)?;
                            admission = Admission::QueuedAfterWait;
                        }
                    }
                }
            }
        }

        state.items.push_back(item);
        drop(state);
        self.not_empty.notify_one();
        Ok(admission)
    }

    fn wait_for_space(&self, state: &mut MutexGuard<'_, QueueState<T>>) -> Result<()> {
        while state.items.len() >= self.capacity && !state.closed {
            self.not_full.wait(state);
        }
        if state.closed {
            return Err(LoggerError::LoggerStopped);
        }
        Ok(())
    }

    /// Move up to `max` items into `out`, blocking while the queue is empty and open.
    ///
    /// Returns `false` only when the queue is closed and fully drained.
    pub fn pop_batch(&self, max: usize, out: &mut Vec<T>) -> bool {
        let mut state = self.state.lock();
        while state.items.is_empty() && !state.closed {
            self.not_empty.wait(&mut state);
        }

        if state.items.is_empty() {
            return false;
        }

        let take = max.max(1).min(state.items.len());
        out.extend(state.items.drain(..take));
        drop(state);
        self.not_full.notify_all();
        true
    }

    /// Stop admitting items. Returns `true` for the call that actually closed it.
    pub fn close(&self) -> bool {
        let mut state = self.state.lock();
        let newly_closed = !state.closed;
        state.closed = true;
        drop(state);

        self.not_empty.notify_all();
        self.not_full.notify_all();
        newly_closed
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    pub fn len(&self) -> usize {
        self.state.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
