//! Wire types shared by every Tandem client crate.
//!
//! Everything here mirrors the backend's JSON contract: snake_case
//! discriminators, RFC 3339 timestamps, and page envelopes carrying
//! `items`/`total_count`/`skip`/`limit`.

mod document;
mod feed;
mod filter;
mod relationship;

pub use document::DocumentSummary;
pub use feed::FeedFacets;
pub use feed::FeedItem;
pub use feed::FeedPage;
pub use feed::InsightItem;
pub use feed::Page;
pub use feed::ProcessingStatus;
pub use feed::ReflectionItem;
pub use feed::ReviewStatus;
pub use filter::FeedFilter;
pub use filter::SortKey;
pub use filter::SortOrder;
pub use relationship::RelationshipAction;
pub use relationship::RelationshipStatus;
pub use relationship::RelationshipSummary;
