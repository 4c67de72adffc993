//! Polling primitives for the session controller
//!
//! This module provides the blocking [`Sleeper`] collaborator, the
//! fixed-decrement [`PollBudget`] used when waiting for a session state, and a
//! [`CancellationToken`] that can stop statement polling.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Blocking delay between polls
pub trait Sleeper: Send {
    /// Blocks the calling thread for `duration`
    fn sleep(&self, duration: Duration);
}

/// [`Sleeper`] that blocks the current thread
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Remaining wait budget for a bounded state poll
///
/// Each poll consumes exactly one interval regardless of how long the poll
/// actually took, so a budget of `T` with interval `i` allows
/// `ceil(T / i)` sleeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollBudget {
    remaining: Duration,
    interval: Duration,
    sleeps: u32,
}

impl PollBudget {
    /// Creates a budget of `total` consumed in steps of `interval`
    #[must_use]
    pub const fn new(total: Duration, interval: Duration) -> Self {
        Self {
            remaining: total,
            interval,
            sleeps: 0,
        }
    }

    /// Returns `true` when no budget remains
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.remaining.is_zero()
    }

    /// Consumes one interval and returns the delay to sleep
    pub fn consume(&mut self) -> Duration {
        self.remaining = self.remaining.saturating_sub(self.interval);
        self.sleeps += 1;
        self.interval
    }

    /// Budget left before the wait times out
    #[must_use]
    pub const fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Number of intervals consumed so far
    #[must_use]
    pub const fn sleeps(&self) -> u32 {
        self.sleeps
    }

    /// Number of sleeps a full wait performs before timing out
    #[must_use]
    pub fn max_sleeps(total: Duration, interval: Duration) -> u32 {
        if interval.is_zero() {
            return 0;
        }
        u32::try_from(total.as_nanos().div_ceil(interval.as_nanos())).unwrap_or(u32::MAX)
    }
}

/// Token to stop an otherwise unbounded statement poll
///
/// Clones share the same flag, so one clone can be handed to another thread
/// and cancelled there. An optional deadline cancels the token automatically.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancellationToken {
    /// Creates a token that is only cancelled manually
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a token that cancels itself at `deadline`
    #[must_use]
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            deadline: Some(deadline),
        }
    }

    /// Creates a token that cancels itself after `timeout` from now
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    /// Cancels the operation
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Checks whether the token was cancelled or its deadline passed
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
            || self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}
