use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use tandem_client::ApiClient;
use tandem_protocol::FeedFacets;
use tandem_protocol::FeedFilter;
use tandem_protocol::FeedItem;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_FEED_LIMIT: u64 = 20;

/// Lifecycle of a feed session. `Ready` is re-entered after every
/// successful fetch; `Error` after any failed one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FeedPhase {
    #[default]
    Idle,
    Loading,
    Ready,
    LoadingMore,
    Refreshing,
    Error,
}

/// What a fetch call actually did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The response was applied to the session state.
    Applied,
    /// The request failed; the error message is in the snapshot.
    Failed,
    /// Nothing was fetched: another fetch was in flight, or there was no
    /// further page to load.
    Skipped,
    /// The response arrived after a filter change or refresh made it
    /// stale, and was dropped.
    Superseded,
    /// The session was cancelled while the request was in flight; state
    /// was left untouched.
    Cancelled,
}

/// Point-in-time view of the session for rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct FeedSnapshot {
    pub phase: FeedPhase,
    pub items: Vec<FeedItem>,
    pub offset: u64,
    pub total_count: u64,
    pub has_more: bool,
    pub facets: Option<FeedFacets>,
    pub last_error: Option<String>,
}

#[derive(Debug, Default)]
struct FeedState {
    phase: FeedPhase,
    filter: FeedFilter,
    items: Vec<FeedItem>,
    offset: u64,
    total_count: u64,
    has_more: bool,
    facets: Option<FeedFacets>,
    last_error: Option<String>,
    /// Bumped whenever accumulated items become invalid (filter change,
    /// refresh). A response carrying an older generation is dropped.
    generation: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FetchKind {
    Initial,
    More,
    Refresh,
}

/// Offset-paged view over `GET /api/v1/journey/feed`.
///
/// Methods take `&self`; the session is shared behind an `Arc` by callers
/// that render from one task and drive fetches from another. At most one
/// request is in flight at a time for `load_more`: the guard is claimed
/// synchronously, before the first await, so racing calls cannot both
/// issue a request.
pub struct FeedSession {
    api: ApiClient,
    limit: u64,
    state: Mutex<FeedState>,
    in_flight: AtomicUsize,
    cancel: CancellationToken,
}

impl FeedSession {
    pub fn new(api: ApiClient, filter: FeedFilter) -> Self {
        Self::with_limit(api, filter, DEFAULT_FEED_LIMIT)
    }

    pub fn with_limit(api: ApiClient, filter: FeedFilter, limit: u64) -> Self {
        Self {
            api,
            limit,
            state: Mutex::new(FeedState {
                filter,
                ..Default::default()
            }),
            in_flight: AtomicUsize::new(0),
            cancel: CancellationToken::new(),
        }
    }

    /// Token to cancel the session when its surface goes away. After
    /// cancellation no response will mutate session state.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn filter(&self) -> FeedFilter {
        self.lock_state().filter.clone()
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        let state = self.lock_state();
        FeedSnapshot {
            phase: state.phase,
            items: state.items.clone(),
            offset: state.offset,
            total_count: state.total_count,
            has_more: state.has_more,
            facets: state.facets.clone(),
            last_error: state.last_error.clone(),
        }
    }

    /// Initial fetch at offset 0. Clears anything already accumulated.
    pub async fn load(&self) -> LoadOutcome {
        self.reset_accumulation(None);
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        self.fetch(FetchKind::Initial).await
    }

    /// Replaces the filter, resets the accumulated list to empty and
    /// refetches from offset 0. No partial-filter diffing: any change
    /// starts over.
    pub async fn set_filter(&self, filter: FeedFilter) -> LoadOutcome {
        self.reset_accumulation(Some(filter));
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        self.fetch(FetchKind::Initial).await
    }

    /// Fetches the next page and appends it. A no-op while another fetch
    /// is in flight or when the feed is exhausted; skipped calls are not
    /// queued or retried.
    pub async fn load_more(&self) -> LoadOutcome {
        if self
            .in_flight
            .compare_exchange(0, 1, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return LoadOutcome::Skipped;
        }
        if !self.lock_state().has_more {
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            return LoadOutcome::Skipped;
        }
        self.fetch(FetchKind::More).await
    }

    /// Refetches page 0 with the current filter and replaces the
    /// accumulated list on success. The stale list stays visible while the
    /// refresh is in flight.
    pub async fn refresh(&self) -> LoadOutcome {
        {
            let mut state = self.lock_state();
            state.generation += 1;
        }
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        self.fetch(FetchKind::Refresh).await
    }

    fn reset_accumulation(&self, filter: Option<FeedFilter>) {
        let mut state = self.lock_state();
        if let Some(filter) = filter {
            state.filter = filter;
        }
        state.generation += 1;
        state.items.clear();
        state.offset = 0;
        state.total_count = 0;
        state.has_more = false;
        state.facets = None;
        state.last_error = None;
    }

    async fn fetch(&self, kind: FetchKind) -> LoadOutcome {
        let (filter, offset, generation) = {
            let mut state = self.lock_state();
            state.phase = match kind {
                FetchKind::Initial => FeedPhase::Loading,
                FetchKind::More => FeedPhase::LoadingMore,
                FetchKind::Refresh => FeedPhase::Refreshing,
            };
            let offset = match kind {
                FetchKind::More => state.offset,
                FetchKind::Initial | FetchKind::Refresh => 0,
            };
            (state.filter.clone(), offset, state.generation)
        };

        let result = self.api.fetch_feed_page(&filter, offset, self.limit).await;

        let outcome = if self.cancel.is_cancelled() {
            LoadOutcome::Cancelled
        } else {
            let mut state = self.lock_state();
            if state.generation != generation {
                LoadOutcome::Superseded
            } else {
                match result {
                    Ok(page) => {
                        let received = page.items.len() as u64;
                        match kind {
                            FetchKind::Initial | FetchKind::Refresh => {
                                state.items = page.items;
                                state.offset = received;
                            }
                            FetchKind::More => {
                                state.items.extend(page.items);
                                state.offset += received;
                            }
                        }
                        state.total_count = page.total_count;
                        // Both conditions are required: a short page or an
                        // exhausted count each terminate pagination.
                        state.has_more =
                            received == self.limit && state.offset < page.total_count;
                        state.facets = page.facets;
                        state.last_error = None;
                        state.phase = FeedPhase::Ready;
                        LoadOutcome::Applied
                    }
                    Err(err) => {
                        tracing::warn!("feed fetch failed: {err}");
                        state.last_error = Some(err.to_string());
                        state.phase = FeedPhase::Error;
                        LoadOutcome::Failed
                    }
                }
            }
        };
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        outcome
    }

    fn lock_state(&self) -> MutexGuard<'_, FeedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for FeedSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedSession")
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}
