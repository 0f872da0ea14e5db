//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! CLI flags / environment (clap)
//!     + optional TOML file (loader.rs)
//!     + profile defaults (schema.rs)
//!     → RawSettings
//!     → validation.rs (semantic checks)
//!     → ProbeConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - Every setting except the target URL has a default
//! - Validation separates syntactic (clap/serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError, ProbeArgs};
pub use schema::{FileConfig, ProbeConfig, ProbeProfile, RawSettings};
pub use validation::ValidationError;
