//! Retry logic.
//!
//! # Responsibilities
//! - Decide whether a failed attempt is followed by another
//! - Supply the fixed delay between attempts
//!
//! # Design Decisions
//! - Budget counts total attempts, not retries after a first try
//! - Every failure kind is retried the same way
//! - No backoff or jitter: the delay is constant

use std::time::Duration;

use crate::config::ProbeConfig;

/// What to do after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Sleep for the delay, then run the next attempt.
    Retry(Duration),
    /// Budget exhausted.
    GiveUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    pub fn from_config(config: &ProbeConfig) -> Self {
        Self::new(config.max_attempts, config.retry_delay())
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Decision after 1-indexed `attempt` failed.
    pub fn after_failure(&self, attempt: u32) -> RetryDecision {
        if attempt < self.max_attempts {
            RetryDecision::Retry(self.delay)
        } else {
            RetryDecision::GiveUp
        }
    }
}
