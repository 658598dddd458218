//! Translation of HTTP status failures into actionable messages.

use log::debug;
use reqwest::StatusCode;

/// A request the server refused, described for the person running the installer.
#[derive(Debug, PartialEq, Eq)]
pub enum HttpFailure {
    /// Rate limit exceeded (HTTP 403 with rate limit message or 429)
    RateLimitExceeded,
    /// Authentication failed (HTTP 401)
    AuthenticationFailed,
    /// Resource not found (HTTP 404)
    NotFound,
    /// Forbidden access (HTTP 403 non-rate-limit)
    Forbidden,
    /// Any other 4xx
    ClientError(u16),
    /// Any 5xx
    ServerError(u16),
}

impl std::fmt::Display for HttpFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpFailure::RateLimitExceeded => write!(
                f,
                "GitHub API rate limit exceeded. Try again later or set the GITHUB_TOKEN environment variable."
            ),
            HttpFailure::AuthenticationFailed => {
                write!(f, "Authentication failed. Check your GITHUB_TOKEN.")
            }
            HttpFailure::NotFound => write!(f, "The requested resource was not found"),
            HttpFailure::Forbidden => {
                write!(f, "Access forbidden. You may need to set GITHUB_TOKEN.")
            }
            HttpFailure::ClientError(code) => write!(f, "Request rejected with HTTP {}", code),
            HttpFailure::ServerError(code) => write!(f, "Server responded with HTTP {}", code),
        }
    }
}

impl std::error::Error for HttpFailure {}

/// Classifies a response status. Returns None for non-error statuses.
pub fn classify_status(status: StatusCode, body_hint: &str) -> Option<HttpFailure> {
    match status {
        StatusCode::UNAUTHORIZED => Some(HttpFailure::AuthenticationFailed),
        StatusCode::FORBIDDEN if body_hint.contains("rate limit") => {
            Some(HttpFailure::RateLimitExceeded)
        }
        StatusCode::FORBIDDEN => Some(HttpFailure::Forbidden),
        StatusCode::TOO_MANY_REQUESTS => Some(HttpFailure::RateLimitExceeded),
        StatusCode::NOT_FOUND => Some(HttpFailure::NotFound),
        s if s.is_client_error() => Some(HttpFailure::ClientError(s.as_u16())),
        s if s.is_server_error() => Some(HttpFailure::ServerError(s.as_u16())),
        _ => None,
    }
}

/// Turns an unsuccessful response into an error carrying an [`HttpFailure`].
pub async fn check_status(response: reqwest::Response) -> anyhow::Result<reqwest::Response> {
    let status = response.status();
    if !status.is_client_error() && !status.is_server_error() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    if let Some(message) = api_message(&body) {
        debug!("{} responded {}: {}", url, status, message);
    }
    let failure =
        classify_status(status, &body).unwrap_or(HttpFailure::ClientError(status.as_u16()));
    Err(anyhow::Error::from(failure).context(format!("GET {}", url)))
}

/// The `message` field GitHub puts in error bodies.
fn api_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("message")?.as_str().map(str::to_string)
}
