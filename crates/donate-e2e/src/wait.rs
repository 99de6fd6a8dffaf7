//! Wait mechanisms for synchronization.
//!
//! Every suspension point of the suite (auto-waiting actions, screen
//! readiness, `expect` retries) goes through [`poll_until`].

use crate::result::E2eResult;
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::trace;

/// Default timeout for actions and readiness waits (30 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 30_000;

/// Default timeout for `expect` assertions (5 seconds)
pub const DEFAULT_EXPECT_TIMEOUT_MS: u64 = 5_000;

/// Default polling interval (100ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Options for wait operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create new wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Outcome of [`poll_until`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Polled<T> {
    /// The probe produced an accepted value
    Ready {
        /// The accepted value
        value: T,
        /// Time spent waiting
        elapsed: Duration,
    },
    /// The timeout expired first
    TimedOut {
        /// Last value the probe produced, if any
        last: Option<T>,
        /// Time spent waiting
        elapsed: Duration,
    },
}

impl<T> Polled<T> {
    /// Check if the wait succeeded
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }
}

/// Repeatedly run `probe` until `accept` approves its value or the timeout
/// expires.
///
/// Retryable probe errors (a missing element) count as "not yet"; any other
/// error is returned immediately. The probe always runs at least once.
pub async fn poll_until<T, F, Fut, P>(
    options: &WaitOptions,
    mut probe: F,
    mut accept: P,
) -> E2eResult<Polled<T>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = E2eResult<T>>,
    P: FnMut(&T) -> bool,
{
    let start = Instant::now();
    let timeout = options.timeout();
    let mut last = None;
    let mut attempts = 0_u32;

    loop {
        attempts += 1;
        match probe().await {
            Ok(value) if accept(&value) => {
                trace!(attempts, "poll accepted");
                return Ok(Polled::Ready {
                    value,
                    elapsed: start.elapsed(),
                });
            }
            Ok(value) => last = Some(value),
            Err(e) if e.is_retryable() => {}
            Err(e) => return Err(e),
        }

        let elapsed = start.elapsed();
        if elapsed >= timeout {
            trace!(attempts, "poll timed out");
            return Ok(Polled::TimedOut { last, elapsed });
        }
        let remaining = timeout.saturating_sub(elapsed);
        tokio::time::sleep(options.poll_interval().min(remaining)).await;
    }
}
