//! Paginated journey-feed session.
//!
//! Wraps the feed endpoint in a small state machine: accumulate pages,
//! advance the offset by what the server actually returned, and guard
//! against duplicate concurrent fetches.

mod session;

pub use session::DEFAULT_FEED_LIMIT;
pub use session::FeedPhase;
pub use session::FeedSession;
pub use session::FeedSnapshot;
pub use session::LoadOutcome;
