//! Single-target HTTP liveness probe.
//!
//! Sends one request to a configured URL under a per-attempt timeout, retrying
//! a bounded number of times, and reports whether the target is healthy.

pub mod config;
pub mod observability;
pub mod probe;
pub mod resilience;

pub use config::{ProbeArgs, ProbeConfig};
pub use probe::{ProbeOutcome, ProbeRunner, ReqwestTransport};
