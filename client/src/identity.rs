use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("identity provider error: {0}")]
    Provider(String),
}

/// Capability surface of the hosted identity SDK.
///
/// The platform delegates sign-in to a third-party provider; this trait is
/// the only thing the rest of the workspace knows about it. Implementations
/// are injected, never global.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Whether the provider has finished its own initialization. Readiness
    /// polling in the navigator keys off this.
    fn is_loaded(&self) -> bool;

    fn is_signed_in(&self) -> bool;

    /// Request a fresh bearer token. Called on every API request; providers
    /// that cache internally may return the same token repeatedly.
    async fn fetch_token(&self) -> Result<String, IdentityError>;
}

/// Token lookup shared by the API client and the navigator.
///
/// `token` never fails: a signed-out user or a provider error both surface
/// as `None`, with the error logged. Callers decide whether a missing token
/// is fatal.
#[derive(Clone)]
pub struct TokenAccessor {
    provider: Arc<dyn IdentityProvider>,
}

impl TokenAccessor {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self { provider }
    }

    pub fn is_loaded(&self) -> bool {
        self.provider.is_loaded()
    }

    pub fn is_signed_in(&self) -> bool {
        self.provider.is_signed_in()
    }

    pub async fn token(&self) -> Option<String> {
        if !self.provider.is_signed_in() {
            return None;
        }
        match self.provider.fetch_token().await {
            Ok(token) => Some(token),
            Err(err) => {
                tracing::warn!("identity provider failed to produce a token: {err}");
                None
            }
        }
    }
}

impl std::fmt::Debug for TokenAccessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenAccessor").finish_non_exhaustive()
    }
}

/// Fixed-token provider. Backs the CLI's env-var path and doubles as the
/// fake for integration tests; consider the staged constructor private to
/// those tests.
pub struct StaticProvider {
    token: Option<String>,
    pending_polls: AtomicUsize,
}

impl StaticProvider {
    pub fn signed_in(token: &str) -> Self {
        Self {
            token: Some(token.to_string()),
            pending_polls: AtomicUsize::new(0),
        }
    }

    pub fn signed_out() -> Self {
        Self {
            token: None,
            pending_polls: AtomicUsize::new(0),
        }
    }

    /// Reports not-loaded for the first `polls` calls to `is_loaded`, then
    /// behaves like `signed_in`. Exercises bounded readiness polling.
    pub fn loading_for(polls: usize, token: &str) -> Self {
        Self {
            token: Some(token.to_string()),
            pending_polls: AtomicUsize::new(polls),
        }
    }
}

#[async_trait]
impl IdentityProvider for StaticProvider {
    fn is_loaded(&self) -> bool {
        let remaining = self.pending_polls.load(Ordering::SeqCst);
        if remaining == 0 {
            return true;
        }
        self.pending_polls.store(remaining - 1, Ordering::SeqCst);
        false
    }

    fn is_signed_in(&self) -> bool {
        self.token.is_some()
    }

    async fn fetch_token(&self) -> Result<String, IdentityError> {
        self.token
            .clone()
            .ok_or_else(|| IdentityError::Provider("not signed in".to_string()))
    }
}
