use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use reqwest::multipart::Form;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::time::sleep;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::identity::TokenAccessor;

/// Backend signal that the current session must be re-established. The
/// header name and the literal value `"true"` are wire contract.
pub const SESSION_REFRESH_HEADER: &str = "X-Session-Refresh-Required";

/// How long after the notice the reload fires.
pub const SESSION_RELOAD_DELAY: Duration = Duration::from_millis(1500);

/// Hook for the cooperative re-authenticate-and-restart protocol.
///
/// When the backend sets [`SESSION_REFRESH_HEADER`], the client surfaces a
/// notice immediately and calls `reload` after [`SESSION_RELOAD_DELAY`] on a
/// spawned task. A browser shell reloads the page; the CLI exits and asks
/// the user to sign in again.
pub trait SessionHandler: Send + Sync {
    fn notice(&self, message: &str);
    fn reload(&self);
}

/// Default handler for embedders that have no surface to restart.
struct LoggingSessionHandler;

impl SessionHandler for LoggingSessionHandler {
    fn notice(&self, message: &str) {
        tracing::warn!("{message}");
    }

    fn reload(&self) {
        tracing::warn!("session reload requested; no session handler installed");
    }
}

pub enum RequestBody {
    Empty,
    Json(Value),
    /// File uploads and other binary payloads pass through unchanged; no
    /// JSON content-type is attached.
    Multipart(Form),
}

pub struct ApiResponse<T> {
    pub data: T,
    pub status: StatusCode,
    pub headers: HeaderMap,
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
    tokens: TokenAccessor,
    session: Arc<dyn SessionHandler>,
}

impl ApiClient {
    pub fn new(config: ClientConfig, tokens: TokenAccessor) -> Result<Self, ApiError> {
        Self::with_session_handler(config, tokens, Arc::new(LoggingSessionHandler))
    }

    pub fn with_session_handler(
        config: ClientConfig,
        tokens: TokenAccessor,
        session: Arc<dyn SessionHandler>,
    ) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self {
            http,
            config,
            tokens,
            session,
        })
    }

    pub fn tokens(&self) -> &TokenAccessor {
        &self.tokens
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<ApiResponse<T>, ApiError> {
        self.request(Method::GET, path, &[], RequestBody::Empty)
            .await
    }

    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<ApiResponse<T>, ApiError> {
        self.request(Method::GET, path, query, RequestBody::Empty)
            .await
    }

    pub async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Value,
    ) -> Result<ApiResponse<T>, ApiError> {
        self.request(Method::POST, path, &[], RequestBody::Json(body))
            .await
    }

    pub async fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<ApiResponse<T>, ApiError> {
        self.request(Method::POST, path, &[], RequestBody::Multipart(form))
            .await
    }

    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: RequestBody,
    ) -> Result<ApiResponse<T>, ApiError> {
        let token = self
            .tokens
            .token()
            .await
            .ok_or(ApiError::NotAuthenticated)?;
        let url = self.config.endpoint(path)?;
        let mut request = self.http.request(method, url).bearer_auth(token);
        if !query.is_empty() {
            request = request.query(query);
        }
        request = match body {
            RequestBody::Empty => request,
            RequestBody::Json(value) => request.json(&value),
            RequestBody::Multipart(form) => request.multipart(form),
        };
        let response = request.send().await?;

        // The refresh signal is checked before any success or error
        // handling; the body is not read at all in that case.
        if session_refresh_requested(response.headers()) {
            self.schedule_session_reload();
            return Err(ApiError::SessionRefreshRequired);
        }

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_error_body(status, &body));
        }
        let headers = response.headers().clone();
        let data = response.json::<T>().await?;
        Ok(ApiResponse {
            data,
            status,
            headers,
        })
    }

    fn schedule_session_reload(&self) {
        self.session
            .notice("Your session needs to be refreshed. Restarting shortly.");
        let session = Arc::clone(&self.session);
        tokio::spawn(async move {
            sleep(SESSION_RELOAD_DELAY).await;
            session.reload();
        });
    }
}

fn session_refresh_requested(headers: &HeaderMap) -> bool {
    headers
        .get(SESSION_REFRESH_HEADER)
        .and_then(|value| value.to_str().ok())
        == Some("true")
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config.base_url.as_str())
            .finish_non_exhaustive()
    }
}
