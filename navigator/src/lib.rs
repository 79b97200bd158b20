//! Next/previous browsing across insight detail views.
//!
//! A detail view knows only the id it is showing. The navigator fetches a
//! bounded candidate snapshot, orders it by session date, finds the anchor
//! and routes to its neighbors. The snapshot is rebuilt on every mount;
//! nothing is cached across anchors.

mod list;
mod readiness;
mod session;

use thiserror::Error;

pub use list::NAV_FETCH_LIMIT;
pub use list::NavigationEntry;
pub use list::build_entries;
pub use list::locate;
pub use readiness::TOKEN_POLL_ATTEMPTS;
pub use readiness::TOKEN_POLL_INTERVAL;
pub use readiness::wait_for_token;
pub use session::InsightNavigator;
pub use session::Router;

use tandem_client::ApiError;

#[derive(Debug, Error)]
pub enum NavigatorError {
    #[error("identity provider did not become ready after {attempts} attempts")]
    IdentityUnavailable { attempts: usize },

    #[error(transparent)]
    Api(#[from] ApiError),
}
