use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("authentication required")]
    NotAuthenticated,

    /// The backend asked for a fresh session. Not a failure: the session
    /// handler has already been notified and a reload is scheduled.
    #[error("session refresh required")]
    SessionRefreshRequired,

    #[error("{message}")]
    Response { status: StatusCode, message: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid base URL `{value}`: {source}")]
    InvalidBaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid request path `{path}`: {source}")]
    InvalidPath {
        path: String,
        #[source]
        source: url::ParseError,
    },
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

impl ApiError {
    /// Non-2xx responses carry the server's `detail` message when the body
    /// is JSON with one, else a generic HTTP-status message.
    pub(crate) fn from_error_body(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|parsed| parsed.detail)
            .unwrap_or_else(|| format!("HTTP {status}"));
        Self::Response { status, message }
    }
}
