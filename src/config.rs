use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::admin::Endpoint;
use crate::claims::{ClaimScheduleConfig, RetryPolicy};
use crate::error::{AppError, AppResult};

/// Runtime configuration, read once at startup.
///
/// Layers, lowest precedence first: built-in defaults, optional config file,
/// environment variables (`INTERVAL`, `ADMIN_API_PORT`, ...).
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Config {
    pub interval: u64,
    pub admin_api_port: u16,
    /// Full base URL; takes precedence over `admin_api_port`
    pub admin_api_url: Option<String>,
    pub probe_timeout_secs: u64,
    pub probe_delay_secs: u64,
    pub probe_attempts: u32,
    pub claims_timeout_secs: u64,
    pub claims_attempts: u32,
    pub claims_retry_delay_secs: u64,
    pub settle_delay_secs: u64,
    pub summary_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::load(None)
    }

    pub fn load(file: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::from_sources(file, config::Environment::default().try_parsing(true))
    }

    fn from_sources(
        file: Option<&Path>,
        env: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .set_default("interval", 60)?
            .set_default("admin_api_port", 9999)?
            .set_default("probe_timeout_secs", 5)?
            .set_default("probe_delay_secs", 3)?
            .set_default("probe_attempts", 20)?
            .set_default("claims_timeout_secs", 60)?
            .set_default("claims_attempts", 3)?
            .set_default("claims_retry_delay_secs", 3)?
            .set_default("settle_delay_secs", 10)?
            .set_default("summary_timeout_secs", 60)?;

        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder.add_source(env).build()?.try_deserialize()
    }

    pub fn validate(&self) -> AppResult<()> {
        let non_zero = [
            ("interval", self.interval),
            ("probe_timeout_secs", self.probe_timeout_secs),
            ("probe_attempts", u64::from(self.probe_attempts)),
            ("claims_timeout_secs", self.claims_timeout_secs),
            ("claims_attempts", u64::from(self.claims_attempts)),
            ("summary_timeout_secs", self.summary_timeout_secs),
        ];

        for (key, value) in non_zero {
            if value == 0 {
                return Err(AppError::Config(format!("{} must be greater than zero", key)));
            }
        }

        let url = self
            .admin_api_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty());

        if let Some(url) = url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(AppError::Config(format!(
                    "admin_api_url must be an http(s) URL, got {}",
                    url
                )));
            }
        }

        Ok(())
    }

    pub fn endpoint(&self) -> Endpoint {
        match self.admin_api_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => Endpoint::new(url),
            _ => Endpoint::local(self.admin_api_port),
        }
    }

    pub fn schedule(&self) -> ClaimScheduleConfig {
        ClaimScheduleConfig {
            interval: Duration::from_secs(self.interval),
            probe_timeout: Duration::from_secs(self.probe_timeout_secs),
            probe_retry: RetryPolicy {
                max_attempts: self.probe_attempts,
                delay: Duration::from_secs(self.probe_delay_secs),
            },
            claims_timeout: Duration::from_secs(self.claims_timeout_secs),
            claims_retry: RetryPolicy {
                max_attempts: self.claims_attempts,
                delay: Duration::from_secs(self.claims_retry_delay_secs),
            },
            settle_delay: Duration::from_secs(self.settle_delay_secs),
            summary_timeout: Duration::from_secs(self.summary_timeout_secs),
        }
    }
}
