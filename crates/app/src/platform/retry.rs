//! Bounded retry with exponential backoff for platform calls.

use std::time::Duration;

use rand::Rng;
use reqwest::{RequestBuilder, Response, StatusCode, header};
use tracing::{debug, warn};

/// Retry behaviour for idempotent platform calls.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Maximum number of retries after the first attempt.
    pub max_retries: u32,

    /// Delay before the first retry.
    pub initial_backoff: Duration,

    /// Ceiling for any single wait, including server supplied `Retry-After`.
    pub max_backoff: Duration,

    pub backoff_multiplier: f64,

    /// Add up to 25% jitter to each wait.
    pub use_jitter: bool,

    /// Response statuses treated as transient.
    pub retry_status_codes: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(30),
            backoff_multiplier: 2.0,
            use_jitter: true,
            retry_status_codes: vec![429, 502, 503, 504],
        }
    }
}

impl RetryConfig {
    /// A config that never retries.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Wait before retry number `attempt` (1-based).
    #[must_use]
    pub fn calculate_backoff(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let exponent = i32::try_from(attempt - 1).unwrap_or(i32::MAX);
        let base = self.initial_backoff.as_secs_f64() * self.backoff_multiplier.powi(exponent);
        let capped = base.min(self.max_backoff.as_secs_f64());

        let delay = if self.use_jitter && capped > 0.0 {
            let range = capped * 0.25;
            (capped + rand::thread_rng().gen_range(-range..=range)).max(0.0)
        } else {
            capped
        };

        Duration::from_secs_f64(delay).min(self.max_backoff)
    }

    #[must_use]
    pub fn should_retry(&self, status: StatusCode) -> bool {
        self.retry_status_codes.contains(&status.as_u16())
    }
}

/// Which failures a call may be retried on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RetryMode {
    /// Connection failures and transient statuses.
    Transient,

    /// Connection failures only; every response is final.
    ConnectionOnly,
}

/// Send `request`, retrying per `config` and `mode`.
///
/// Requests whose body cannot be cloned are sent exactly once. Dropping the
/// returned future abandons any pending wait.
pub(crate) async fn send_with_retry(
    request: RequestBuilder,
    config: &RetryConfig,
    mode: RetryMode,
) -> Result<Response, reqwest::Error> {
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;

        let retries_left = attempt <= config.max_retries;

        let Some(current) = request.try_clone() else {
            return request.send().await;
        };

        match current.send().await {
            Ok(response) => {
                let status = response.status();

                if mode == RetryMode::Transient && retries_left && config.should_retry(status) {
                    let wait = retry_after(&response)
                        .map(|wait| wait.min(config.max_backoff))
                        .unwrap_or_else(|| config.calculate_backoff(attempt));

                    warn!(
                        url = %response.url(),
                        %status,
                        attempt,
                        wait_ms = wait.as_millis(),
                        "transient platform response, retrying"
                    );

                    tokio::time::sleep(wait).await;
                    continue;
                }

                debug!(url = %response.url(), %status, attempt, "platform response");

                return Ok(response);
            }
            Err(error) if retries_left && is_connection_error(&error) => {
                let wait = config.calculate_backoff(attempt);

                warn!(
                    error = %error,
                    attempt,
                    wait_ms = wait.as_millis(),
                    "platform request failed, retrying"
                );

                tokio::time::sleep(wait).await;
            }
            Err(error) => return Err(error),
        }
    }
}

fn is_connection_error(error: &reqwest::Error) -> bool {
    error.is_connect() || error.is_timeout()
}

fn retry_after(response: &Response) -> Option<Duration> {
    if response.status() != StatusCode::TOO_MANY_REQUESTS {
        return None;
    }

    response
        .headers()
        .get(header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}
