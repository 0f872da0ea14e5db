//! Configuration loading from flags, environment and disk.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::Parser;
use thiserror::Error;

use crate::config::schema::{FileConfig, ProbeConfig, ProbeProfile, RawSettings};
use crate::config::validation::{validate_settings, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A setting that may be given but left blank.
///
/// Orchestrators often render unset values as `KEY=`; a blank value means
/// "use the default", same as leaving the variable out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrDefault<T>(pub Option<T>);

impl<T> OrDefault<T> {
    fn into_value(self) -> Option<T> {
        self.0
    }
}

fn or_default<T>(value: &str) -> Result<OrDefault<T>, String>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let value = value.trim();
    if value.is_empty() {
        return Ok(OrDefault(None));
    }
    value.parse::<T>().map(|v| OrDefault(Some(v))).map_err(|e| e.to_string())
}

/// Command-line and environment inputs.
///
/// Flags win over environment variables; both win over the settings file.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "ping-probe", version)]
#[command(about = "Probe an HTTP endpoint with a timeout and bounded retries", long_about = None)]
pub struct ProbeArgs {
    /// URL to probe
    #[arg(long, env = "TARGET_URL")]
    pub target_url: Option<String>,

    /// HTTP method
    #[arg(long, env = "METHOD", value_parser = or_default::<String>)]
    pub method: Option<OrDefault<String>>,

    /// Per-attempt timeout in milliseconds
    #[arg(long, env = "TIMEOUT_MS", value_parser = or_default::<u64>)]
    pub timeout_ms: Option<OrDefault<u64>>,

    /// Total number of attempts
    #[arg(long = "max-attempts", env = "MAX_RETRIES", value_parser = or_default::<u32>)]
    pub max_attempts: Option<OrDefault<u32>>,

    /// Delay between attempts in milliseconds
    #[arg(long, env = "RETRY_DELAY_MS", value_parser = or_default::<u64>)]
    pub retry_delay_ms: Option<OrDefault<u64>>,

    /// Defaults profile: retrying or single-shot
    #[arg(long, env = "PROBE_PROFILE", value_parser = or_default::<ProbeProfile>)]
    pub profile: Option<OrDefault<ProbeProfile>>,

    /// Optional TOML settings file
    #[arg(long, env = "PROBE_CONFIG", value_parser = or_default::<PathBuf>)]
    pub config: Option<OrDefault<PathBuf>>,
}

fn given<T>(value: &Option<OrDefault<T>>) -> Option<T>
where
    T: Clone,
{
    value.clone().and_then(OrDefault::into_value)
}

impl ProbeArgs {
    pub fn profile(&self) -> ProbeProfile {
        given(&self.profile).unwrap_or_default()
    }

    pub fn config_path(&self) -> Option<PathBuf> {
        given(&self.config)
    }
}

/// Read and parse the TOML settings file.
pub fn load_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_file_config(&content)
}

pub fn parse_file_config(content: &str) -> Result<FileConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Layer args over file settings over profile defaults.
pub fn merge_settings(args: &ProbeArgs, file: FileConfig) -> RawSettings {
    let defaults = args.profile().defaults();
    RawSettings {
        target_url: args.target_url.clone().or(file.target_url),
        method: given(&args.method)
            .or(file.method.filter(|m| !m.trim().is_empty()))
            .unwrap_or_else(|| "GET".to_string()),
        timeout_ms: given(&args.timeout_ms)
            .or(file.timeout_ms)
            .unwrap_or(defaults.timeout_ms),
        max_attempts: given(&args.max_attempts)
            .or(file.max_attempts)
            .unwrap_or(defaults.max_attempts),
        retry_delay_ms: given(&args.retry_delay_ms)
            .or(file.retry_delay_ms)
            .unwrap_or(defaults.retry_delay_ms),
    }
}

/// Load, merge and validate configuration.
pub fn load_config(args: &ProbeArgs) -> Result<ProbeConfig, ConfigError> {
    let file = match args.config_path() {
        Some(path) => load_file_config(&path)?,
        None => FileConfig::default(),
    };

    let raw = merge_settings(args, file);
    let config = validate_settings(&raw).map_err(ConfigError::Validation)?;

    tracing::debug!(
        target_url = %config.target_url,
        method = %config.method,
        timeout_ms = config.timeout_ms,
        max_attempts = config.max_attempts,
        retry_delay_ms = config.retry_delay_ms,
        profile = ?args.profile(),
        "Configuration loaded"
    );

    Ok(config)
}
