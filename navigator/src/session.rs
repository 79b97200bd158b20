use std::sync::Arc;
use std::time::Duration;

use tandem_client::ApiClient;
use tandem_client::endpoints::insight_detail_path;
use tandem_protocol::FeedFilter;
use uuid::Uuid;

use crate::NavigatorError;
use crate::list::NAV_FETCH_LIMIT;
use crate::list::NavigationEntry;
use crate::list::build_entries;
use crate::list::locate;
use crate::readiness::TOKEN_POLL_ATTEMPTS;
use crate::readiness::TOKEN_POLL_INTERVAL;
use crate::readiness::wait_for_token;

/// Client-side route sink. The web shell pushes history entries; the CLI
/// prints the target route.
pub trait Router: Send + Sync {
    fn push(&self, path: &str);
}

/// Snapshot-backed next/previous navigation for one anchor insight.
///
/// Navigation itself never mutates this value: pushing a route hands
/// control to the next detail view, which builds its own navigator for the
/// new anchor.
pub struct InsightNavigator {
    entries: Vec<NavigationEntry>,
    current_index: Option<usize>,
    router: Arc<dyn Router>,
}

impl InsightNavigator {
    /// Fetches the candidate snapshot and locates `anchor` in it.
    ///
    /// Waits for identity readiness first (the provider may still be
    /// loading when a detail view mounts). An anchor missing from the
    /// snapshot (created after it, or filtered as non-navigable) is benign:
    /// navigation is inert and a warning is logged.
    pub async fn load(
        api: &ApiClient,
        anchor: Uuid,
        router: Arc<dyn Router>,
    ) -> Result<Self, NavigatorError> {
        Self::load_with_poll(api, anchor, router, TOKEN_POLL_ATTEMPTS, TOKEN_POLL_INTERVAL).await
    }

    pub async fn load_with_poll(
        api: &ApiClient,
        anchor: Uuid,
        router: Arc<dyn Router>,
        attempts: usize,
        interval: Duration,
    ) -> Result<Self, NavigatorError> {
        wait_for_token(api.tokens(), attempts, interval).await?;
        let page = api
            .fetch_feed_page(&FeedFilter::default(), 0, NAV_FETCH_LIMIT)
            .await?;
        let entries = build_entries(page.items);
        let current_index = locate(&entries, anchor);
        if current_index.is_none() {
            tracing::warn!(
                "insight {anchor} not found among {count} navigation candidates",
                count = entries.len()
            );
        }
        Ok(Self {
            entries,
            current_index,
            router,
        })
    }

    pub fn entries(&self) -> &[NavigationEntry] {
        &self.entries
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    /// Next means the next entry in date-descending order, i.e. one older.
    pub fn has_next(&self) -> bool {
        match self.current_index {
            Some(index) => index + 1 < self.entries.len(),
            None => false,
        }
    }

    pub fn has_previous(&self) -> bool {
        match self.current_index {
            Some(index) => index > 0,
            None => false,
        }
    }

    /// Routes to the neighbor; silently ignored at either end of the list.
    pub fn navigate_to_next(&self) {
        if let Some(index) = self.current_index
            && index + 1 < self.entries.len()
        {
            self.push_entry(index + 1);
        }
    }

    pub fn navigate_to_previous(&self) {
        if let Some(index) = self.current_index
            && index > 0
        {
            self.push_entry(index - 1);
        }
    }

    /// Routes to an arbitrary position; out-of-range indices are ignored.
    pub fn navigate_to_index(&self, index: usize) {
        if index < self.entries.len() {
            self.push_entry(index);
        }
    }

    fn push_entry(&self, index: usize) {
        self.router.push(&insight_detail_path(self.entries[index].id));
    }
}

impl std::fmt::Debug for InsightNavigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InsightNavigator")
            .field("entries", &self.entries.len())
            .field("current_index", &self.current_index)
            .finish_non_exhaustive()
    }
}
