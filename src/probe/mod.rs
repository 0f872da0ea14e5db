//! Probe subsystem.
//!
//! # Data Flow
//! ```text
//! ProbeConfig
//!     → runner.rs (attempt loop)
//!         → transport.rs (one HTTP exchange, cancellable)
//!         → attempt.rs (classify, render log line)
//!     → ProbeReport { outcome, attempts }
//! ```
//!
//! # Design Decisions
//! - Attempts run sequentially, never concurrently
//! - Timeouts, HTTP failures and transport errors are retried alike
//! - The runner returns an outcome; only the binary decides the exit code

pub mod attempt;
pub mod runner;
pub mod transport;

pub use attempt::{AttemptLine, AttemptResult, BODY_EXCERPT_LIMIT};
pub use runner::{ProbeOutcome, ProbeReport, ProbeRunner};
pub use transport::{ProbeRequest, Reply, ReqwestTransport, Transport, TransportError};
