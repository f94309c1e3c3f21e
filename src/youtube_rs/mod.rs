use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Deserialize;

pub mod playlist_items;

/// Docs:
/// https://developers.google.com/youtube/v3/docs/playlistItems
#[derive(Debug, Clone)]
pub enum Credential {
    /// Sent as the `key` query parameter.
    ApiKey(String),
    /// Sent as a bearer token.
    AccessToken(String),
}

impl Credential {
    pub fn kind(&self) -> &'static str {
        match self {
            Credential::ApiKey(_) => "API key",
            Credential::AccessToken(_) => "access token",
        }
    }

    pub(crate) fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Credential::ApiKey(key) => request.query(&[("key", key)]),
            Credential::AccessToken(token) => request.bearer_auth(token),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Not authorized: {message}")]
    Unauthorized { message: String },
    #[error("Not found: {message}")]
    NotFound { message: String },
    #[error("Access forbidden: {message}")]
    Forbidden { message: String },
    #[error("Request failed with status {status}: {message}")]
    Http { status: u16, message: String },
    #[error("Failed to send http request: {0}")]
    Transport(reqwest::Error),
    #[error("Failed to parse response: {0}")]
    Decode(reqwest::Error),
    #[error("Invalid request url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/* ---------- Error envelope ---------- */

/// `{"error": {"code": 403, "message": "...", "errors": [{"reason": "..."}]}}`
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    reason: Option<String>,
}

/// Builds a human readable message from an error body, falling back to the raw text.
fn error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(response) => {
            let message = response
                .error
                .message
                .unwrap_or_else(|| status.to_string());
            match response.error.errors.iter().find_map(|e| e.reason.as_deref()) {
                Some(reason) => format!("{message} ({reason})"),
                None => message,
            }
        }
        Err(_) if body.trim().is_empty() => status.to_string(),
        Err(_) => body.trim().to_string(),
    }
}

pub(crate) fn classify_status(status: StatusCode, body: &str) -> CatalogError {
    let message = error_message(status, body);
    match status {
        StatusCode::UNAUTHORIZED => CatalogError::Unauthorized { message },
        StatusCode::NOT_FOUND => CatalogError::NotFound { message },
        StatusCode::FORBIDDEN => CatalogError::Forbidden { message },
        _ => CatalogError::Http {
            status: status.as_u16(),
            message,
        },
    }
}

/// Sends the request and maps non-success statuses to a typed error.
pub(crate) async fn send(request: RequestBuilder) -> Result<Response, CatalogError> {
    let response = request.send().await.map_err(CatalogError::Transport)?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Failed to get error text".to_string());
    Err(classify_status(status, &body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_forbidden_with_reason() {
        let body = r#"{"error":{"code":403,"message":"The request cannot be completed because you have exceeded your quota.","errors":[{"reason":"quotaExceeded"}]}}"#;
        match classify_status(StatusCode::FORBIDDEN, body) {
            CatalogError::Forbidden { message } => {
                assert!(message.contains("exceeded your quota"));
                assert!(message.ends_with("(quotaExceeded)"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_classify_not_found_and_unauthorized() {
        assert!(matches!(
            classify_status(StatusCode::NOT_FOUND, ""),
            CatalogError::NotFound { .. }
        ));
        assert!(matches!(
            classify_status(StatusCode::UNAUTHORIZED, "{}"),
            CatalogError::Unauthorized { .. }
        ));
    }

    #[test]
    fn test_classify_other_status_keeps_raw_body() {
        match classify_status(StatusCode::BAD_GATEWAY, "upstream went away\n") {
            CatalogError::Http { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "upstream went away");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
