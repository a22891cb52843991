//! Overflow policies for the bounded message queue
//!
//! When the queue is full, the policy determines what happens to a new record.
//! Blocking is the default; the dropping policies must be opted into.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Policy for handling a full message queue
///
/// # Example
///
/// ```
/// use queued_logger::OverflowPolicy;
///
/// // Default behavior: block the producer until the worker frees a slot
/// assert_eq!(OverflowPolicy::default(), OverflowPolicy::Block);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverflowPolicy {
    /// Block until space is available
    ///
    /// No record is ever lost; producers absorb the latency instead.
    #[default]
    Block,

    /// Reject the incoming record when the queue is full
    DropNewest,

    /// Evict the oldest queued record to make room for the incoming one
    DropOldest,
}

impl OverflowPolicy {
    #[inline]
    pub fn may_drop(&self) -> bool {
        !matches!(self, OverflowPolicy::Block)
    }
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowPolicy::Block => write!(f, "Block"),
            OverflowPolicy::DropNewest => write!(f, "DropNewest"),
            OverflowPolicy::DropOldest => write!(f, "DropOldest"),
        }
    }
}
