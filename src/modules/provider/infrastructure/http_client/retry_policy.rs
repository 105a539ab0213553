//! Retry policies for the remote catalogs
//!
//! Handles provider-specific rate limiting with retry logic based on
//! HTTP headers and provider characteristics.

use std::time::Duration;

/// Configuration for HTTP retry behavior
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts
    pub max_retries: u32,
    /// Base delay between retries (will be adjusted based on headers)
    pub base_delay: Duration,
    /// Maximum delay to wait (prevents excessive waits)
    pub max_delay: Duration,
    /// Whether to use exponential backoff
    pub exponential_backoff: bool,
    /// Multiplier for exponential backoff
    pub backoff_multiplier: f64,
    /// Add up to 10% random delay on top of the backoff
    pub jitter: bool,
}

impl RetryPolicy {
    /// AniList: strict per-minute budget, answers 429 with Retry-After
    pub fn anilist() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(60), // Max 1 minute
            exponential_backoff: true,
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }

    /// TMDB: generous limits, mostly transient 5xx
    pub fn tmdb() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            exponential_backoff: true,
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }

    /// Static files (the base mapping download)
    pub fn static_content() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(10),
            exponential_backoff: false,
            backoff_multiplier: 1.0,
            jitter: false,
        }
    }

    /// Calculate delay for next retry attempt
    pub fn calculate_delay(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        // If server provided Retry-After header, respect it
        if let Some(server_delay) = retry_after {
            return server_delay.min(self.max_delay);
        }

        let delay = if self.exponential_backoff {
            let multiplier = self.backoff_multiplier.powi(attempt as i32);
            Duration::from_millis((self.base_delay.as_millis() as f64 * multiplier) as u64)
        } else {
            self.base_delay
        };
        let delay = delay.min(self.max_delay);

        if self.jitter {
            let jitter_ms = (delay.as_millis() as f64 * 0.1 * rand::random::<f64>()) as u64;
            delay + Duration::from_millis(jitter_ms)
        } else {
            delay
        }
    }
}

/// Information extracted from HTTP 429 responses
#[derive(Debug, Clone)]
pub struct RateLimitInfo {
    /// How long to wait before next request (from Retry-After header)
    pub retry_after: Option<Duration>,
    /// When the rate limit resets (from X-RateLimit-Reset header)
    pub reset_time: Option<Duration>,
    /// Number of requests remaining (from X-RateLimit-Remaining header)
    pub remaining: Option<u32>,
    /// Total rate limit (from X-RateLimit-Limit header)
    pub limit: Option<u32>,
}

impl RateLimitInfo {
    /// Parse rate limit information from HTTP response headers
    pub fn from_headers(headers: &reqwest::header::HeaderMap) -> Self {
        let retry_after = headers
            .get("retry-after")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(Duration::from_secs);

        let reset_time = headers
            .get("x-ratelimit-reset")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(|timestamp| {
                let now = std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .unwrap_or_default()
                    .as_secs();
                Duration::from_secs(timestamp.saturating_sub(now))
            });

        let remaining = headers
            .get("x-ratelimit-remaining")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.trim().parse::<u32>().ok());

        let limit = headers
            .get("x-ratelimit-limit")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.trim().parse::<u32>().ok());

        Self {
            retry_after,
            reset_time,
            remaining,
            limit,
        }
    }

    /// Get the best delay recommendation from available information
    pub fn recommended_delay(&self) -> Option<Duration> {
        // Prioritize Retry-After header
        self.retry_after.or(self.reset_time)
    }
}

/// Determines if a transport error is worth retrying
pub fn is_retryable_error(error: &reqwest::Error) -> bool {
    if let Some(status) = error.status() {
        matches!(status.as_u16(), 408 | 425 | 429 | 500..=599)
    } else {
        // Network errors are potentially retryable
        error.is_timeout() || error.is_connect()
    }
}

/// Whether an HTTP status should be retried after a backoff
pub fn is_retryable_status(status: reqwest::StatusCode) -> bool {
    status.is_server_error()
        || status == reqwest::StatusCode::REQUEST_TIMEOUT
        || status.as_u16() == 425
}
