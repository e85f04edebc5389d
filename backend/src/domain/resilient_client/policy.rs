//! Backoff policy and the per-call retry state machine.
//!
//! A call starts in `Attempt(0)`. A transient failure either moves it to
//! `Wait(delay(n))` followed by `Attempt(n + 1)`, or ends it as `Exhausted`
//! once the attempt budget is spent.

use std::time::Duration;

/// Multiplier used when the configured one is not a finite value >= 1.
pub const DEFAULT_MULTIPLIER: f64 = 2.0;

/// Retry configuration for upstream directory calls.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts per call, including the first one.
    pub max_attempts: u32,
    /// Wait before the first retry.
    pub initial_delay: Duration,
    /// Growth factor applied to each subsequent wait.
    pub multiplier: f64,
    /// Upper bound for any single wait.
    pub max_delay: Duration,
    /// Hint returned to callers once retries are exhausted.
    pub retry_after: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(500),
            multiplier: DEFAULT_MULTIPLIER,
            max_delay: Duration::from_secs(10),
            retry_after: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    /// Attempt budget, never below one.
    #[must_use]
    pub fn attempt_budget(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Wait before retry `retry` (0-based): `initial × multiplier^retry`,
    /// capped at `max_delay`.
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    ///
    /// use directory_gateway::domain::RetryPolicy;
    ///
    /// let policy = RetryPolicy::default();
    /// assert_eq!(policy.delay_for(0), Duration::from_millis(500));
    /// assert_eq!(policy.delay_for(1), Duration::from_millis(1_000));
    /// assert_eq!(policy.delay_for(30), Duration::from_secs(10));
    /// ```
    #[must_use]
    pub fn delay_for(&self, retry: u32) -> Duration {
        let multiplier = if self.multiplier.is_finite() && self.multiplier >= 1.0 {
            self.multiplier
        } else {
            DEFAULT_MULTIPLIER
        };
        let exponent = i32::try_from(retry).unwrap_or(i32::MAX);
        let seconds = self.initial_delay.as_secs_f64() * multiplier.powi(exponent);
        Duration::try_from_secs_f64(seconds)
            .map_or(self.max_delay, |delay| delay.min(self.max_delay))
    }
}

/// Outcome of recording one transient failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Wait for `delay`, then make attempt `next_attempt`.
    Retry {
        /// Backoff before the next attempt.
        delay: Duration,
        /// 0-based index of the upcoming attempt.
        next_attempt: u32,
    },
    /// The attempt budget is spent.
    Exhausted {
        /// Attempts made in total.
        attempts: u32,
    },
}

/// Retry bookkeeping for a single call. Never shared between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryState {
    attempt: u32,
    next_delay: Duration,
}

impl RetryState {
    /// Start at `Attempt(0)`.
    #[must_use]
    pub fn new(policy: &RetryPolicy) -> Self {
        Self {
            attempt: 0,
            next_delay: policy.delay_for(0),
        }
    }

    /// 0-based index of the attempt in progress.
    #[must_use]
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Wait that follows the next transient failure, if a retry remains.
    #[must_use]
    pub fn next_delay(&self) -> Duration {
        self.next_delay
    }

    /// Record a transient failure of the current attempt and advance.
    pub fn record_transient_failure(&mut self, policy: &RetryPolicy) -> RetryDecision {
        let attempts = self.attempt.saturating_add(1);
        if attempts >= policy.attempt_budget() {
            return RetryDecision::Exhausted { attempts };
        }

        let delay = self.next_delay;
        self.attempt = attempts;
        self.next_delay = policy.delay_for(attempts);
        RetryDecision::Retry {
            delay,
            next_attempt: attempts,
        }
    }
}
