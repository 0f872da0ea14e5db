//! Timeout enforcement.
//!
//! # Responsibilities
//! - Bound each attempt with a deadline
//! - Cancel the in-flight request when the deadline passes
//! - Tear the timer down when the attempt ends, whatever the outcome
//!
//! # Design Decisions
//! - The deadline is a `CancellationToken` handed to the transport
//! - The timer is a Tokio task that is aborted on drop

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Per-attempt deadline.
///
/// Must be created inside a Tokio runtime. Dropping it aborts the pending timer,
/// so a finished attempt never leaves a cancellation armed.
#[derive(Debug)]
pub struct Deadline {
    token: CancellationToken,
    timer: JoinHandle<()>,
    timeout: Duration,
}

impl Deadline {
    /// Arm a deadline that cancels its token after `timeout`.
    pub fn start(timeout: Duration) -> Self {
        let token = CancellationToken::new();
        let timer_token = token.clone();
        let timer = tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            timer_token.cancel();
        });

        Self {
            token,
            timer,
            timeout,
        }
    }

    /// Token that fires when the deadline passes.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn is_expired(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Drop for Deadline {
    fn drop(&mut self) {
        self.timer.abort();
    }
}
