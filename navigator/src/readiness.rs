use std::time::Duration;

use tandem_client::TokenAccessor;
use tokio::time::sleep;

use crate::NavigatorError;

pub const TOKEN_POLL_ATTEMPTS: usize = 10;
pub const TOKEN_POLL_INTERVAL: Duration = Duration::from_millis(300);

/// Waits for the identity provider to finish loading and hand out a token.
///
/// The provider exposes no push-based ready signal, so this polls: each
/// attempt checks the loaded flag, then asks for a token. The wait is
/// bounded at `attempts * interval`; past that the caller gets
/// [`NavigatorError::IdentityUnavailable`].
pub async fn wait_for_token(
    tokens: &TokenAccessor,
    attempts: usize,
    interval: Duration,
) -> Result<String, NavigatorError> {
    for attempt in 0..attempts {
        if attempt > 0 {
            sleep(interval).await;
        }
        if !tokens.is_loaded() {
            continue;
        }
        if let Some(token) = tokens.token().await {
            return Ok(token);
        }
    }
    Err(NavigatorError::IdentityUnavailable { attempts })
}
