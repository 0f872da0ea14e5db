//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Route success lines to stdout and failures to stderr
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Diagnostic level configurable via `RUST_LOG`
//! - Report lines use their own target, which `RUST_LOG` cannot silence

use std::io::IsTerminal;

use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Target of the success/failure/configuration lines a scheduler reads.
pub const REPORT_TARGET: &str = "ping_probe::report";

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "ping_probe=info";

const REPORT_DIRECTIVE: &str = "ping_probe::report=info";

/// Build the event filter from an optional `RUST_LOG` value.
///
/// Whatever the user asks for, report lines stay at INFO.
pub fn build_filter(rust_log: Option<&str>) -> EnvFilter {
    let filter = rust_log
        .and_then(|spec| EnvFilter::try_new(spec).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER));

    match REPORT_DIRECTIVE.parse::<Directive>() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// Colour only when both streams are terminals; the fmt layer shares one
/// setting across the stdout and stderr writers.
fn use_ansi(stdout_tty: bool, stderr_tty: bool) -> bool {
    stdout_tty && stderr_tty
}

/// Install the global subscriber. Safe to call more than once.
pub fn init_logging() {
    let writer = std::io::stderr
        .with_max_level(Level::WARN)
        .or_else(std::io::stdout);

    let rust_log = std::env::var("RUST_LOG").ok();
    let ansi = use_ansi(
        std::io::stdout().is_terminal(),
        std::io::stderr().is_terminal(),
    );

    let _ = tracing_subscriber::registry()
        .with(build_filter(rust_log.as_deref()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(ansi)
                .with_writer(writer),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_directive_survives_restrictive_filter() {
        for spec in [Some("warn"), Some("error"), Some("off"), None, Some("not=a=filter")] {
            let rendered = build_filter(spec).to_string().to_ascii_lowercase();
            assert!(rendered.contains(REPORT_DIRECTIVE), "{spec:?} -> {rendered}");
        }
    }

    #[test]
    fn test_ansi_requires_both_terminals() {
        assert!(use_ansi(true, true));
        assert!(!use_ansi(false, true));
        assert!(!use_ansi(true, false));
        assert!(!use_ansi(false, false));
    }
}
