use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use digest_core::{Error, PageLayout, Result};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const TIMEFRAME_ENDPOINT: &str = "/update_timeframe";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const BASE_URL_ENV: &str = "DIGEST_BASE_URL";
pub const TIMEOUT_ENV: &str = "DIGEST_TIMEOUT_SECS";

/// What to do with a response that arrives after a newer selection was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StalePolicy {
    /// Apply every response as it arrives; the last one to land wins.
    #[default]
    ApplyInArrivalOrder,
    /// Ignore responses superseded by a newer selection.
    DiscardStale,
}

impl FromStr for StalePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "arrival" | "apply-in-arrival-order" => Ok(StalePolicy::ApplyInArrivalOrder),
            "discard-stale" | "latest" => Ok(StalePolicy::DiscardStale),
            other => Err(Error::Config(format!("Unknown stale policy: {}", other))),
        }
    }
}

impl fmt::Display for StalePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StalePolicy::ApplyInArrivalOrder => f.write_str("arrival"),
            StalePolicy::DiscardStale => f.write_str("discard-stale"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub endpoint: String,
    pub timeout: Duration,
    pub stale_policy: StalePolicy,
    pub layout: PageLayout,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoint: TIMEFRAME_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            stale_policy: StalePolicy::default(),
            layout: PageLayout::default(),
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `DIGEST_BASE_URL` and `DIGEST_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(url) = env::var(BASE_URL_ENV) {
            config = config.with_base_url(&url);
        }
        if let Ok(secs) = env::var(TIMEOUT_ENV) {
            let secs = secs
                .trim()
                .parse::<u64>()
                .map_err(|e| Error::Config(format!("{} must be a number of seconds: {}", TIMEOUT_ENV, e)))?;
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config.validate()?;
        Ok(config)
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_stale_policy(mut self, policy: StalePolicy) -> Self {
        self.stale_policy = policy;
        self
    }

    pub fn with_layout(mut self, layout: PageLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.base_url)?;
        if self.timeout.is_zero() {
            return Err(Error::Config("timeout must be greater than zero".to_string()));
        }
        Ok(())
    }
}
