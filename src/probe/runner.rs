//! The probe runner: attempt loop, deadline and retry policy.
//!
//! # State machine
//! ```text
//! ATTEMPT(n) -(success)-> Healthy
//! ATTEMPT(n) -(failure, n < max)-> SLEEP -> ATTEMPT(n+1)
//! ATTEMPT(n) -(failure, n == max)-> Unhealthy
//! ```

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::config::ProbeConfig;
use crate::observability::logging::REPORT_TARGET;
use crate::probe::attempt::{AttemptLine, AttemptResult};
use crate::probe::transport::{ProbeRequest, Transport, TransportError};
use crate::resilience::{Deadline, RetryDecision, RetryPolicy};

/// Final result of a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Attempt `attempt` succeeded.
    Healthy { attempt: u32 },
    /// All `attempts` failed.
    Unhealthy { attempts: u32 },
}

impl ProbeOutcome {
    pub fn is_healthy(&self) -> bool {
        matches!(self, ProbeOutcome::Healthy { .. })
    }
}

/// Outcome plus every attempt, in order.
#[derive(Debug, Clone)]
pub struct ProbeReport {
    pub outcome: ProbeOutcome,
    pub attempts: Vec<AttemptResult>,
}

pub struct ProbeRunner<T> {
    config: ProbeConfig,
    policy: RetryPolicy,
    transport: T,
}

impl<T: Transport> ProbeRunner<T> {
    pub fn new(config: ProbeConfig, transport: T) -> Self {
        let policy = RetryPolicy::from_config(&config);
        Self {
            config,
            policy,
            transport,
        }
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Run attempts until one succeeds or the budget is spent.
    pub async fn run(&self) -> ProbeReport {
        let request = ProbeRequest {
            method: self.config.method.clone(),
            url: self.config.target_url.clone(),
        };
        let mut attempts = Vec::new();
        let mut attempt = 0;

        loop {
            attempt += 1;
            let result = self.attempt(&request).await;
            let line = AttemptLine {
                attempt: self.config.reports_attempts().then_some(attempt),
                method: &request.method,
                url: &self.config.display_url,
                timeout_ms: self.config.timeout_ms,
                result: &result,
            };

            if result.is_success() {
                tracing::info!(target: REPORT_TARGET, "{line}");
                attempts.push(result);
                return ProbeReport {
                    outcome: ProbeOutcome::Healthy { attempt },
                    attempts,
                };
            }

            tracing::warn!(target: REPORT_TARGET, "{line}");
            attempts.push(result);

            match self.policy.after_failure(attempt) {
                RetryDecision::Retry(delay) => {
                    tracing::debug!(attempt, delay = ?delay, "Retrying probe");
                    tokio::time::sleep(delay).await;
                }
                RetryDecision::GiveUp => {
                    return ProbeReport {
                        outcome: ProbeOutcome::Unhealthy { attempts: attempt },
                        attempts,
                    };
                }
            }
        }
    }

    /// One request/response cycle under its own deadline.
    async fn attempt(&self, request: &ProbeRequest) -> AttemptResult {
        let deadline = Deadline::start(self.config.timeout());
        let start = Instant::now();

        let sent = self.transport.send(request, deadline.token()).await;
        let elapsed_ms = || start.elapsed().as_millis() as u64;

        // A reply that lands after the deadline does not count.
        if deadline.is_expired() {
            return AttemptResult::Timeout {
                elapsed_ms: elapsed_ms(),
            };
        }

        match sent {
            Ok(reply) if reply.status.is_success() => {
                AttemptResult::success(reply.status, elapsed_ms())
            }
            Ok(reply) => {
                let elapsed = elapsed_ms();
                let body = read_body(reply.body, deadline.token()).await;
                AttemptResult::http_failure(reply.status, elapsed, &body)
            }
            Err(TransportError::Cancelled) => AttemptResult::Timeout {
                elapsed_ms: elapsed_ms(),
            },
            Err(TransportError::Failed(message)) => AttemptResult::TransportError {
                message,
                elapsed_ms: elapsed_ms(),
            },
        }
    }
}

/// Best-effort body read: any failure yields an empty string.
async fn read_body(
    body: futures_util::future::BoxFuture<'static, Result<String, TransportError>>,
    cancel: &CancellationToken,
) -> String {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => String::new(),
        text = body => text.unwrap_or_default(),
    }
}
