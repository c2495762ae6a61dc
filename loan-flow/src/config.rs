use std::time::Duration;

use reqwest::Url;

use crate::error::{LoanFlowError, Result};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/predict";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENDPOINT_ENV: &str = "LOAN_PREDICTOR_URL";
pub const TIMEOUT_ENV: &str = "LOAN_PREDICTOR_TIMEOUT_SECS";

/// Settings for talking to the prediction service.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint: Url,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            endpoint: parse_endpoint(endpoint)?,
            timeout,
        })
    }

    /// Read `LOAN_PREDICTOR_URL` and `LOAN_PREDICTOR_TIMEOUT_SECS`, falling
    /// back to the defaults when unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let endpoint = lookup(ENDPOINT_ENV).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let timeout_secs = match lookup(TIMEOUT_ENV) {
            Some(raw) => parse_timeout_secs(&raw)?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        Self::new(&endpoint, Duration::from_secs(timeout_secs))
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Result<Self> {
        self.endpoint = parse_endpoint(endpoint)?;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

fn parse_endpoint(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| LoanFlowError::Config(format!("invalid endpoint {raw:?}: {e}")))
}

pub fn parse_timeout_secs(raw: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .map_err(|e| LoanFlowError::Config(format!("invalid timeout {raw:?}: {e}")))
}
