use thiserror::Error;

#[derive(Debug, Error)]
/// Failure kinds surfaced by backend API calls.
///
/// Rate limiting is its own variant so callers can treat it as transient
/// without inspecting status codes; every other non-success response stays a
/// terminal `HttpStatus`.
pub enum ApiError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("backend returned non-success status {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("backend rate limited the request")]
    RateLimited { retry_after_ms: Option<u64> },
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}
