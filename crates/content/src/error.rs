use copydesk_core::error::CoreError;
use serde_json::Value;

/// Status/code markers the AI service uses to signal an exhausted quota.
const RATE_LIMIT_MARKERS: &[&str] = &["rate_limited", "RATE_LIMITED", "USAGE_LIMIT_REACHED"];

/// Errors from the content-service HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum ContentServiceError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The AI service reported that the usage limit is reached.
    #[error("Usage limit reached")]
    RateLimited,

    /// The service returned a non-2xx status code.
    #[error("Service error ({status}): {message}")]
    Service { status: u16, message: String },
}

impl From<ContentServiceError> for CoreError {
    fn from(err: ContentServiceError) -> Self {
        match err {
            ContentServiceError::Request(e) => CoreError::Unavailable(e.to_string()),
            ContentServiceError::RateLimited => CoreError::RateLimited,
            ContentServiceError::Service { message, .. } => CoreError::Upstream(message),
        }
    }
}

/// Whether a response signals rate limiting, by HTTP 429 or a body marker
/// in `status` or `code`.
pub fn is_rate_limited(status: u16, body: Option<&Value>) -> bool {
    if status == 429 {
        return true;
    }
    let Some(body) = body else {
        return false;
    };
    ["status", "code"].iter().any(|key| {
        body.get(*key)
            .and_then(Value::as_str)
            .is_some_and(|v| RATE_LIMIT_MARKERS.contains(&v))
    })
}

/// Best human-readable message from an error response body.
pub fn error_message(status: u16, body: Option<&Value>, raw: &str) -> String {
    let from_json = body.and_then(|b| {
        ["message", "error"]
            .iter()
            .find_map(|key| b.get(*key).and_then(Value::as_str))
            .map(str::to_owned)
    });
    match from_json {
        Some(message) if !message.trim().is_empty() => message,
        _ if !raw.trim().is_empty() && body.is_none() => raw.trim().to_string(),
        _ => format!("Service returned HTTP {status}"),
    }
}
