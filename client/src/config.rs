use std::time::Duration;

use url::Url;

use crate::error::ApiError;

pub const BASE_URL_ENV_VAR: &str = "TANDEM_BASE_URL";

/// Local backend default. Deployments always set [`BASE_URL_ENV_VAR`].
const DEFAULT_BASE_URL: &str = "http://localhost:8000";

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The single source of truth for where the backend lives.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: Url,
    pub request_timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
        }
    }

    /// Reads `TANDEM_BASE_URL`, falling back to the local default.
    pub fn from_env() -> Result<Self, ApiError> {
        let value =
            std::env::var(BASE_URL_ENV_VAR).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(&value).map_err(|source| ApiError::InvalidBaseUrl {
            value,
            source,
        })?;
        Ok(Self::new(base_url))
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|source| ApiError::InvalidPath {
                path: path.to_string(),
                source,
            })
    }
}
