//! Typed backend API client used by the startup sequencer.
//!
//! Builds one reqwest client from resolved configuration and exposes the
//! endpoint surface as explicit results. Transport policy is deliberately
//! minimal: no automatic retries, one timeout, rate limiting surfaced as its
//! own error kind.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::retry_after::parse_retry_after_ms;
use crate::types::{HealthNotice, OnboardingStatus, User};

const SESSION_TOKEN_HEADER: &str = "x-session-token";

#[derive(Debug, Clone)]
/// Public struct `ApiConfig` used across Quill components.
pub struct ApiConfig {
    pub api_base: String,
    pub request_timeout_ms: u64,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.quill.chat".to_string(),
            request_timeout_ms: 15_000,
            user_agent: "quill-client".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
/// Public struct `ApiClient` used across Quill components.
pub struct ApiClient {
    http: reqwest::Client,
    api_base: String,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(config.user_agent.trim()).map_err(|error| {
                ApiError::InvalidResponse(format!("invalid user agent header: {error}"))
            })?,
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(config.request_timeout_ms.max(1)))
            .build()?;

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    /// Probes the backend root endpoint; any 200 response means reachable.
    pub async fn probe_root(&self) -> Result<(), ApiError> {
        let response = self.http.get(self.url("/")).send().await?;
        if response.status().as_u16() == 200 {
            return Ok(());
        }
        Err(Self::failure_from(response).await)
    }

    /// Checks whether `token` still names a live session.
    ///
    /// A 401/403 is a definitive "invalid" answer, not an error; every other
    /// non-success response is surfaced so the caller can decide how to fold
    /// it.
    pub async fn check_session_token(&self, token: &str) -> Result<bool, ApiError> {
        let response = self
            .http
            .get(self.url("/session"))
            .header(SESSION_TOKEN_HEADER, token)
            .send()
            .await?;
        let status = response.status().as_u16();
        match status {
            200 => Ok(true),
            401 | 403 => Ok(false),
            _ => Err(Self::failure_from(response).await),
        }
    }

    /// Asks whether the authenticated account still requires onboarding.
    pub async fn needs_onboarding(&self, token: &str) -> Result<bool, ApiError> {
        let status: OnboardingStatus = self
            .request_json(
                self.http
                    .get(self.url("/onboarding/status"))
                    .header(SESSION_TOKEN_HEADER, token),
            )
            .await?;
        Ok(status.onboarding)
    }

    /// Fetches the account behind `token`; the session-hydration call.
    pub async fn fetch_own_user(&self, token: &str) -> Result<User, ApiError> {
        self.request_json(
            self.http
                .get(self.url("/account/me"))
                .header(SESSION_TOKEN_HEADER, token),
        )
        .await
    }

    /// Fetches the service health notice. Requires no authentication.
    pub async fn health_notice(&self) -> Result<HealthNotice, ApiError> {
        self.request_json(self.http.get(self.url("/health"))).await
    }

    async fn request_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(Self::failure_from(response).await);
        }
        let raw = response.text().await?;
        serde_json::from_str(&raw).map_err(ApiError::from)
    }

    async fn failure_from(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let retry_after_ms = parse_retry_after_ms(response.headers());
        let body = response.text().await.unwrap_or_default();
        if status == 429 {
            return ApiError::RateLimited { retry_after_ms };
        }
        ApiError::HttpStatus { status, body }
    }
}
