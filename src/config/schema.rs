//! Configuration schema definitions.
//!
//! `ProbeConfig` is the validated, immutable form handed to the runner.
//! `FileConfig` mirrors the optional TOML settings file.

use std::str::FromStr;
use std::time::Duration;

use reqwest::Method;
use serde::Deserialize;
use url::Url;

/// Validated configuration for one probe invocation.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Absolute http(s) URL to probe.
    pub target_url: Url,

    /// The URL as configured, used in log lines.
    pub display_url: String,

    /// HTTP method, uppercased.
    pub method: Method,

    /// Per-attempt timeout in milliseconds.
    pub timeout_ms: u64,

    /// Total attempt budget (>= 1).
    pub max_attempts: u32,

    /// Delay between failed attempts in milliseconds.
    pub retry_delay_ms: u64,
}

impl ProbeConfig {
    /// Build a config with the default profile's settings for `target_url`.
    pub fn new(target_url: Url) -> Self {
        let defaults = ProbeProfile::default().defaults();
        Self {
            display_url: target_url.to_string(),
            target_url,
            method: Method::GET,
            timeout_ms: defaults.timeout_ms,
            max_attempts: defaults.max_attempts,
            retry_delay_ms: defaults.retry_delay_ms,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// Whether log lines should carry the attempt number.
    pub fn reports_attempts(&self) -> bool {
        self.max_attempts > 1
    }
}

/// Named set of defaults.
///
/// `SingleShot` reproduces the one-attempt probe: a shorter timeout and no retry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProbeProfile {
    #[default]
    Retrying,
    SingleShot,
}

impl FromStr for ProbeProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "retrying" => Ok(ProbeProfile::Retrying),
            "single-shot" => Ok(ProbeProfile::SingleShot),
            other => Err(format!(
                "unknown profile '{other}' (expected retrying or single-shot)"
            )),
        }
    }
}

/// Defaults supplied by a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileDefaults {
    pub timeout_ms: u64,
    pub max_attempts: u32,
    pub retry_delay_ms: u64,
}

impl ProbeProfile {
    pub fn defaults(self) -> ProfileDefaults {
        match self {
            ProbeProfile::Retrying => ProfileDefaults {
                timeout_ms: 300_000,
                max_attempts: 2,
                retry_delay_ms: 5_000,
            },
            ProbeProfile::SingleShot => ProfileDefaults {
                timeout_ms: 120_000,
                max_attempts: 1,
                retry_delay_ms: 5_000,
            },
        }
    }
}

/// Optional TOML settings file. Every key may be omitted.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub target_url: Option<String>,
    pub method: Option<String>,
    pub timeout_ms: Option<u64>,
    pub max_attempts: Option<u32>,
    pub retry_delay_ms: Option<u64>,
}

/// Settings after merging all sources, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSettings {
    pub target_url: Option<String>,
    pub method: String,
    pub timeout_ms: u64,
    pub max_attempts: u32,
    pub retry_delay_ms: u64,
}
