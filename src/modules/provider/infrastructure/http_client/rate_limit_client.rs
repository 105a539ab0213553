//! HTTP client with automatic rate limiting and retry logic
//!
//! Every remote catalog goes through one of these, so throttling and backoff
//! live in a single place instead of in each adapter.

use super::retry_policy::{is_retryable_error, is_retryable_status, RateLimitInfo, RetryPolicy};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::LogContext;
use governor::{Quota, RateLimiter as GovernorRateLimiter};
use reqwest::{Client, Method, Response, StatusCode};
use serde_json::Value;
use std::num::NonZeroU32;
use std::time::{Duration, Instant};
use tokio::time::sleep;

const USER_AGENT: &str = concat!("seasonmap/", env!("CARGO_PKG_VERSION"));

type DirectRateLimiter = GovernorRateLimiter<
    governor::state::direct::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
    governor::middleware::NoOpMiddleware,
>;

/// HTTP client that handles rate limiting and retries
pub struct RateLimitClient {
    client: Client,
    rate_limiter: DirectRateLimiter,
    retry_policy: RetryPolicy,
    bearer_token: Option<String>,
    provider_name: String,
}

impl RateLimitClient {
    /// Client for the AniList GraphQL API
    pub fn for_anilist(requests_per_minute: u32, timeout: Duration) -> AppResult<Self> {
        Self::new(
            "AniList",
            RetryPolicy::anilist(),
            // burst of 1 keeps requests evenly spaced inside the minute budget
            Quota::per_minute(non_zero(requests_per_minute)).allow_burst(NonZeroU32::MIN),
            timeout,
        )
    }

    /// Client for the TMDB REST API
    pub fn for_tmdb(requests_per_second: u32, timeout: Duration) -> AppResult<Self> {
        let rate = non_zero(requests_per_second);
        Self::new(
            "TMDB",
            RetryPolicy::tmdb(),
            Quota::per_second(rate).allow_burst(rate),
            timeout,
        )
    }

    /// Client for static files such as the base mapping dump
    pub fn for_static_content(timeout: Duration) -> AppResult<Self> {
        Self::new(
            "Static",
            RetryPolicy::static_content(),
            Quota::per_second(NonZeroU32::MIN),
            // the mapping dump is large
            timeout.max(Duration::from_secs(60)),
        )
    }

    /// Create a custom client
    pub fn new(
        provider_name: &str,
        retry_policy: RetryPolicy,
        quota: Quota,
        timeout: Duration,
    ) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                AppError::InternalError(format!(
                    "Failed to build {} HTTP client: {}",
                    provider_name, e
                ))
            })?;

        Ok(Self {
            client,
            rate_limiter: GovernorRateLimiter::direct(quota),
            retry_policy,
            bearer_token: None,
            provider_name: provider_name.to_string(),
        })
    }

    /// Send `Authorization: Bearer <token>` with every request
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Make a GET request with rate limiting and retries
    pub async fn get<T>(&self, url: &str) -> AppResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.request_with_retries(Method::GET, url, None).await
    }

    /// Make a POST request with JSON body
    pub async fn post_json<T>(&self, url: &str, body: &Value) -> AppResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.request_with_retries(Method::POST, url, Some(body))
            .await
    }

    /// Make a request with automatic retries and rate limiting
    async fn request_with_retries<T>(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> AppResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let endpoint = redact(url);
        let attempts = self.retry_policy.max_retries + 1;

        for attempt in 0..attempts {
            let is_last = attempt + 1 == attempts;

            // Wait for rate limiter before attempting request
            self.rate_limiter.until_ready().await;

            LogContext::api_call(&self.provider_name, endpoint, "starting", None);
            let started = Instant::now();

            let response = match self.build_and_send_request(&method, url, body).await {
                Ok(response) => response,
                Err(e) => {
                    if is_retryable_error(&e) && !is_last {
                        let delay = self.retry_policy.calculate_delay(attempt, None);
                        log::warn!(
                            "{} API request failed (attempt {}/{}): {}. Retrying in {:?}",
                            self.provider_name,
                            attempt + 1,
                            attempts,
                            e,
                            delay
                        );
                        sleep(delay).await;
                        continue;
                    }
                    log::error!(
                        "{} API request to {} failed: {}",
                        self.provider_name,
                        endpoint,
                        e
                    );
                    return Err(AppError::from(e));
                }
            };

            let status = response.status();
            LogContext::api_call(
                &self.provider_name,
                endpoint,
                status.as_str(),
                Some(started.elapsed().as_millis() as u64),
            );

            if status == StatusCode::TOO_MANY_REQUESTS {
                if is_last {
                    return Err(AppError::RateLimitError(format!(
                        "{} API rate limit exceeded after {} attempts",
                        self.provider_name, attempts
                    )));
                }
                let rate_limit_info = RateLimitInfo::from_headers(response.headers());
                let delay = self.calculate_retry_delay(attempt, &rate_limit_info);
                log::warn!(
                    "{} API rate limited (attempt {}/{}). Waiting {:?} before retry.",
                    self.provider_name,
                    attempt + 1,
                    attempts,
                    delay
                );
                sleep(delay).await;
                continue;
            }

            if status == StatusCode::NOT_FOUND {
                return Err(AppError::NotFound(format!(
                    "{} resource {} not found",
                    self.provider_name, endpoint
                )));
            }

            if !status.is_success() {
                let error_msg = format!("{} API returned error: {}", self.provider_name, status);

                if is_retryable_status(status) {
                    if is_last {
                        return Err(AppError::ExternalServiceError(format!(
                            "{} after {} attempts",
                            error_msg, attempts
                        )));
                    }
                    let delay = self.retry_policy.calculate_delay(attempt, None);
                    log::warn!(
                        "{} (attempt {}/{}). Retrying in {:?}",
                        error_msg,
                        attempt + 1,
                        attempts,
                        delay
                    );
                    sleep(delay).await;
                    continue;
                }

                let detail = response.text().await.unwrap_or_default();
                return Err(AppError::ApiError(format!(
                    "{}: {}",
                    error_msg,
                    truncate(&detail, 200)
                )));
            }

            return self.parse_response(response).await;
        }

        // attempts is never zero, every iteration returns or continues
        Err(AppError::ExternalServiceError(format!(
            "{} API request failed after {} attempts",
            self.provider_name, attempts
        )))
    }

    /// Build and send the actual HTTP request
    async fn build_and_send_request(
        &self,
        method: &Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<Response, reqwest::Error> {
        let mut request_builder = self
            .client
            .request(method.clone(), url)
            .header("Accept", "application/json");

        if let Some(token) = &self.bearer_token {
            request_builder = request_builder.bearer_auth(token);
        }

        // Add body for POST requests
        if let Some(json_body) = body {
            request_builder = request_builder.json(json_body);
        }

        request_builder.send().await
    }

    /// Parse the response body as JSON
    async fn parse_response<T>(&self, response: Response) -> AppResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response_text = response.text().await.map_err(|e| {
            AppError::SerializationError(format!(
                "Failed to read {} response: {}",
                self.provider_name, e
            ))
        })?;

        serde_json::from_str(&response_text).map_err(|e| {
            AppError::SerializationError(format!(
                "Failed to parse {} response: {}. Response: {}",
                self.provider_name,
                e,
                truncate(&response_text, 200)
            ))
        })
    }

    /// Calculate delay for retry based on rate limit info and policy
    fn calculate_retry_delay(&self, attempt: u32, rate_limit_info: &RateLimitInfo) -> Duration {
        self.retry_policy
            .calculate_delay(attempt, rate_limit_info.recommended_delay())
    }

    /// Check if a request can be made now (for testing/debugging)
    pub fn can_make_request_now(&self) -> bool {
        self.rate_limiter.check().is_ok()
    }

    /// Get provider name
    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }

    pub fn has_bearer_token(&self) -> bool {
        self.bearer_token.is_some()
    }
}

fn non_zero(value: u32) -> NonZeroU32 {
    NonZeroU32::new(value).unwrap_or(NonZeroU32::MIN)
}

/// URL without its query string, which may carry an api key
fn redact(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", text.chars().take(max_chars).collect::<String>())
    } else {
        text.to_string()
    }
}
