//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Each attempt:
//!     → timeouts.rs (arm deadline, hand its token to the transport)
//!     → On failure: retries.rs (retry after a fixed delay, or give up)
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every attempt has a deadline
//! - Attempts run strictly one after another

pub mod retries;
pub mod timeouts;

pub use retries::{RetryDecision, RetryPolicy};
pub use timeouts::Deadline;
