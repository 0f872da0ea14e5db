//! `ping-probe` entry point.
//!
//! Exit status: 0 when an attempt succeeds, 1 on a configuration error or when
//! every attempt fails.

use std::process::ExitCode;

use clap::Parser;

use ping_probe::config::{load_config, ProbeArgs};
use ping_probe::observability::logging::REPORT_TARGET;
use ping_probe::observability::init_logging;
use ping_probe::probe::{ProbeRunner, ReqwestTransport};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = match ProbeArgs::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_logging();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(target: REPORT_TARGET, "{e}");
            return ExitCode::FAILURE;
        }
    };

    let transport = match ReqwestTransport::new() {
        Ok(transport) => transport,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build HTTP client");
            return ExitCode::FAILURE;
        }
    };

    let report = ProbeRunner::new(config, transport).run().await;

    if report.outcome.is_healthy() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
