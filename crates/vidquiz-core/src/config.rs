use std::time::Duration;

use crate::error::Result;

/// Tunables for one pipeline run. External-service limits vary by account,
/// so none of these are hard-coded at call sites.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Maximum in-flight sentences during fan-out.
    pub concurrency: usize,
    /// Per-request timeout applied to the shared HTTP client.
    pub request_timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            concurrency: 4,
            request_timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
        }
    }
}

impl PipelineConfig {
    /// Build the reqwest client shared by the API-backed services.
    pub fn http_client(&self) -> Result<reqwest::Client> {
        let client = reqwest::Client::builder()
            .timeout(self.request_timeout)
            .build()?;
        Ok(client)
    }
}

/// Retry-with-backoff policy for transient external-API failures.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Additional attempts after the first failure.
    pub max_retries: u32,
    /// Delay before the first retry; doubles per subsequent attempt.
    pub backoff_base: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            backoff_base: Duration::from_millis(250),
        }
    }
}

impl RetryPolicy {
    /// Backoff delay before retry number `attempt` (zero-based).
    pub fn delay(&self, attempt: u32) -> Duration {
        self.backoff_base * 2u32.saturating_pow(attempt)
    }
}
