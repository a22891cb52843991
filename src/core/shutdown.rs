//! Shutdown coordination between the logger facade and its worker
//!
//! The lifecycle only moves forward: `Running -> Draining -> Stopped`. Waiters
//! block on a channel whose only sender lives inside the worker thread; the
//! channel disconnects when the worker exits, whichever way it exits.

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Exit status reported to the fatal handler
pub const FATAL_EXIT_CODE: i32 = 1;

/// Invoked once, after the drain that follows a FATAL record
///
/// The default handler terminates the process with the given code.
pub type FatalHandler = Arc<dyn Fn(i32) + Send + Sync>;

/// Handler that ends the process via [`std::process::exit`]
pub fn exit_process() -> FatalHandler {
    Arc::new(|code| std::process::exit(code))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LifecycleState {
    Running = 0,
    Draining = 1,
    Stopped = 2,
}

impl LifecycleState {
    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => LifecycleState::Running,
            1 => LifecycleState::Draining,
            _ => LifecycleState::Stopped,
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleState::Running => write!(f, "Running"),
            LifecycleState::Draining => write!(f, "Draining"),
            LifecycleState::Stopped => write!(f, "Stopped"),
        }
    }
}

/// Why the logger left the `Running` state
///
/// `Fatal` outranks `Closed`: a FATAL record drained after `close` still
/// terminates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum ShutdownReason {
    Closed = 1,
    Fatal = 2,
}

const NO_REASON: u8 = 0;

pub struct ShutdownCoordinator {
    state: AtomicU8,
    reason: AtomicU8,
    done: Receiver<()>,
}

/// Held by the worker; dropping it releases every waiter
pub struct CompletionGuard {
    _done: Sender<()>,
}

impl ShutdownCoordinator {
    pub fn new() -> (Arc<Self>, CompletionGuard) {
        // Nothing is ever sent; waiters return when the sender disconnects.
        let (tx, rx) = bounded(0);
        let coordinator = Arc::new(Self {
            state: AtomicU8::new(LifecycleState::Running as u8),
            reason: AtomicU8::new(NO_REASON),
            done: rx,
        });
        (coordinator, CompletionGuard { _done: tx })
    }

    pub fn state(&self) -> LifecycleState {
        LifecycleState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub fn reason(&self) -> Option<ShutdownReason> {
        match self.reason.load(Ordering::Acquire) {
            1 => Some(ShutdownReason::Closed),
            2 => Some(ShutdownReason::Fatal),
            _ => None,
        }
    }

    /// Enter `Draining` (if still `Running`) and record the reason
    pub fn begin_drain(&self, reason: ShutdownReason) {
        self.reason.fetch_max(reason as u8, Ordering::AcqRel);
        let _ = self.state.compare_exchange(
            LifecycleState::Running as u8,
            LifecycleState::Draining as u8,
            Ordering::AcqRel,
            Ordering::Acquire,
        );
    }

    /// Enter `Stopped`. Never skips `Draining`.
    pub fn finish(&self) {
        if self.state() == LifecycleState::Running {
            self.begin_drain(ShutdownReason::Closed);
        }
        self.state
            .store(LifecycleState::Stopped as u8, Ordering::Release);
    }

    /// Block until the worker has exited
    pub fn wait(&self) {
        let _ = self.done.recv();
    }

    /// Block until the worker has exited or `timeout` elapses
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        matches!(
            self.done.recv_timeout(timeout),
            Err(RecvTimeoutError::Disconnected) | Ok(())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_lifecycle_is_monotonic() {
        let (coordinator, _guard) = ShutdownCoordinator::new();
        assert_eq!(coordinator.state(), LifecycleState::Running);
        assert_eq!(coordinator.reason(), None);

        coordinator.begin_drain(ShutdownReason::Closed);
        assert_eq!(coordinator.state(), LifecycleState::Draining);

        coordinator.finish();
        assert_eq!(coordinator.state(), LifecycleState::Stopped);

        coordinator.begin_drain(ShutdownReason::Closed);
        assert_eq!(coordinator.state(), LifecycleState::Stopped);
    }

    #[test]
    fn test_fatal_reason_outranks_closed() {
        let (coordinator, _guard) = ShutdownCoordinator::new();
        coordinator.begin_drain(ShutdownReason::Closed);
        coordinator.begin_drain(ShutdownReason::Fatal);
        coordinator.begin_drain(ShutdownReason::Closed);
        assert_eq!(coordinator.reason(), Some(ShutdownReason::Fatal));
    }

    #[test]
    fn test_finish_passes_through_draining() {
        let (coordinator, _guard) = ShutdownCoordinator::new();
        coordinator.finish();
        assert_eq!(coordinator.state(), LifecycleState::Stopped);
        assert_eq!(coordinator.reason(), Some(ShutdownReason::Closed));
    }

    #[test]
    fn test_waiters_released_when_guard_dropped() {
        let (coordinator, guard) = ShutdownCoordinator::new();
        assert!(!coordinator.wait_timeout(Duration::from_millis(20)));

        let waiters: Vec<_> = (0..3)
            .map(|_| {
                let coordinator = Arc::clone(&coordinator);
                thread::spawn(move || coordinator.wait())
            })
            .collect();

        drop(guard);
        for waiter in waiters {
            waiter.join().unwrap();
        }
        assert!(coordinator.wait_timeout(Duration::from_millis(1)));
    }
}
