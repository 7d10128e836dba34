//! Configuration

use std::time::Duration;

use clap::Args;
use reqwest::Url;

use crate::readiness::ReadinessProbe;

/// Invoice backend settings.
#[derive(Debug, Args)]
pub struct BackendConfig {
    /// Invoice backend base URL
    // clap forbids required globals; a missing value still fails when the struct is built.
    #[arg(long, env = "INVOICER_API_URL", global = true, required = false)]
    pub api_url: Url,

    /// URL pinged to wake the backend; defaults to the API URL
    #[arg(long, env = "INVOICER_WAKE_URL", global = true)]
    pub wake_url: Option<Url>,

    /// Delay after a failed wake-up ping, in milliseconds
    #[arg(
        long,
        env = "INVOICER_WAKE_FALLBACK_MS",
        default_value_t = 5_000_u64,
        global = true
    )]
    pub wake_fallback_ms: u64,

    /// Upper bound for the wake-up ping, in seconds
    #[arg(
        long,
        env = "INVOICER_WAKE_TIMEOUT_SECS",
        default_value_t = 180_u64,
        global = true
    )]
    pub wake_timeout_secs: u64,

    /// Skip the wake-up ping
    #[arg(long, global = true)]
    pub no_wake: bool,
}

impl BackendConfig {
    /// The URL pinged to wake the backend.
    pub fn wake_url(&self) -> &Url {
        self.wake_url.as_ref().unwrap_or(&self.api_url)
    }

    /// Probe for the wake URL with the configured fallback and timeout.
    pub fn probe(&self) -> ReadinessProbe {
        ReadinessProbe::new(self.wake_url().clone())
            .with_fallback(Duration::from_millis(self.wake_fallback_ms))
            .with_timeout(Duration::from_secs(self.wake_timeout_secs))
    }

    /// The probe to run before a command, unless waking is disabled.
    pub fn readiness_probe(&self) -> Option<ReadinessProbe> {
        (!self.no_wake).then(|| self.probe())
    }
}

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info", global = true)]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(
        long,
        env = "LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Compact,
        global = true
    )]
    pub log_format: LogFormat,
}
