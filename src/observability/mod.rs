//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! config / runner
//!     → tracing events
//!     → logging.rs (WARN and above to stderr, the rest to stdout)
//! ```

pub mod logging;

pub use logging::init_logging;
