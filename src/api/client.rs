//! Resilient request client.
//!
//! The sole network-failure boundary: every upstream call goes through
//! [`send_with_retry`], which absorbs transient failures (transport errors,
//! timeouts, non-success statuses, unparseable payloads) up to a bounded
//! attempt count with a fixed wait between attempts. The client holds no
//! per-call state and is freely reusable across unrelated calls.

use std::future::Future;
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AttemptError, RequestError};
use crate::metrics;

/// Retry budget for one call: bounded attempts with a fixed wait between
/// them. Exponential backoff could be layered in without changing callers.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Maximum attempts before "retries exhausted".
    pub max_attempts: u32,
    /// Fixed wait between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            delay: Duration::from_millis(1500),
        }
    }
}

impl RetryPolicy {
    /// Build the policy from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_attempts: config.max_attempts,
            delay: Duration::from_millis(config.retry_delay_ms),
        }
    }
}

/// Run `op` until it succeeds or the retry budget is spent.
///
/// `label` identifies the call site in diagnostics and in the terminal
/// [`RequestError::RetriesExhausted`]. Failure logging is best-effort and
/// never fails the call.
pub async fn send_with_retry<T, F, Fut>(
    policy: RetryPolicy,
    label: &str,
    mut op: F,
) -> Result<T, RequestError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AttemptError>>,
{
    let mut attempt = 0u32;

    loop {
        attempt += 1;
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if attempt >= policy.max_attempts {
                    warn!(label, attempt, error = %err, "retries exhausted");
                    metrics::inc_requests_exhausted();
                    return Err(RequestError::RetriesExhausted {
                        label: label.to_string(),
                        attempts: attempt,
                        source: err,
                    });
                }

                debug!(
                    label,
                    attempt,
                    max_attempts = policy.max_attempts,
                    delay_ms = policy.delay.as_millis() as u64,
                    error = %err,
                    "attempt failed, retrying"
                );
                metrics::inc_request_retries();
                sleep(policy.delay).await;
            }
        }
    }
}

/// HTTP client for the game gateway and marketplace.
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// Pooled HTTP client shared by all calls.
    http: reqwest::Client,
    /// Gateway API key, sent as `X-API-Key`.
    api_key: String,
    /// Retry budget applied to every call.
    retry: RetryPolicy,
    /// Leaderboard endpoint.
    leaderboard_url: String,
    /// Battle-history endpoint.
    battles_url: String,
    /// Community fighters endpoint.
    fighters_url: String,
    /// Marketplace GraphQL endpoint.
    marketplace_url: String,
}

impl ApiClient {
    /// Create a new client from config with pooled HTTP settings.
    pub fn new(config: &Config) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.http_timeout_ms))
            .connect_timeout(Duration::from_millis(2000))
            .tcp_keepalive(Duration::from_secs(30))
            .pool_max_idle_per_host(config.http_pool_size)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .expect("failed to create HTTP client");

        Self {
            http,
            api_key: config.skymavis_api_key.clone(),
            retry: RetryPolicy::from_config(config),
            leaderboard_url: config.leaderboard_url.clone(),
            battles_url: config.battles_url.clone(),
            fighters_url: config.fighters_url.clone(),
            marketplace_url: config.marketplace_url.clone(),
        }
    }

    /// Leaderboard endpoint URL.
    pub fn leaderboard_url(&self) -> &str {
        &self.leaderboard_url
    }

    /// Battle-history endpoint URL.
    pub fn battles_url(&self) -> &str {
        &self.battles_url
    }

    /// Community fighters endpoint URL.
    pub fn fighters_url(&self) -> &str {
        &self.fighters_url
    }

    /// Keyed-query GET returning a JSON payload, with retries.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
        label: &str,
    ) -> Result<T, RequestError> {
        let start = Instant::now();
        metrics::inc_requests(label);

        let result = send_with_retry(self.retry, label, || async move {
            let response = self
                .http
                .get(url)
                .header("accept", "application/json")
                .header("X-API-Key", &self.api_key)
                .query(query)
                .send()
                .await
                .map_err(AttemptError::Transport)?;

            let status = response.status();
            if !status.is_success() {
                return Err(AttemptError::Status(status));
            }

            response
                .json::<T>()
                .await
                .map_err(|e| AttemptError::Payload(e.to_string()))
        })
        .await;

        metrics::record_request_latency(start, label);
        result
    }

    /// Marketplace GraphQL POST, with retries. A missing envelope field is a
    /// payload failure and retried like any other.
    pub(crate) async fn post_graphql<T: DeserializeOwned>(
        &self,
        body: &serde_json::Value,
        label: &str,
    ) -> Result<T, RequestError> {
        let start = Instant::now();
        metrics::inc_requests(label);

        let result = send_with_retry(self.retry, label, || async move {
            let response = self
                .http
                .post(&self.marketplace_url)
                .json(body)
                .send()
                .await
                .map_err(AttemptError::Transport)?;

            let status = response.status();
            if !status.is_success() {
                return Err(AttemptError::Status(status));
            }

            response
                .json::<T>()
                .await
                .map_err(|e| AttemptError::Payload(e.to_string()))
        })
        .await;

        metrics::record_request_latency(start, label);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            delay: Duration::from_millis(1),
        }
    }

    #[tokio::test]
    async fn succeeds_on_first_attempt() {
        let result = send_with_retry(fast_policy(3), "test", || async {
            Ok::<_, AttemptError>(42)
        })
        .await;

        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn retries_until_success() {
        let counter = Arc::new(AtomicU32::new(0));
        let calls = counter.clone();

        let result = send_with_retry(fast_policy(5), "test", || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(AttemptError::Payload("flaky".to_string()))
                } else {
                    Ok(7)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn exhaustion_carries_label_and_attempt_count() {
        let counter = Arc::new(AtomicU32::new(0));
        let calls = counter.clone();

        let result: Result<i32, _> = send_with_retry(fast_policy(4), "twin-search", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(AttemptError::Payload("down".to_string())) }
        })
        .await;

        assert_eq!(counter.load(Ordering::SeqCst), 4);
        match result.unwrap_err() {
            RequestError::RetriesExhausted {
                label, attempts, ..
            } => {
                assert_eq!(label, "twin-search");
                assert_eq!(attempts, 4);
            }
        }
    }

    #[tokio::test]
    async fn single_attempt_budget_never_retries() {
        let counter = Arc::new(AtomicU32::new(0));
        let calls = counter.clone();

        let result: Result<i32, _> = send_with_retry(fast_policy(1), "test", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(AttemptError::Payload("down".to_string())) }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
