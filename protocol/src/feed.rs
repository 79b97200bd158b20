use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_with::skip_serializing_none;
use time::OffsetDateTime;
use uuid::Uuid;

/// Review state the coaching team assigns to a generated insight.
///
/// The backend may grow new states; unknown values deserialize to
/// [`ReviewStatus::Unknown`] instead of failing the whole page.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    Flagged,
    #[serde(other)]
    Unknown,
}

/// Ingestion state of an uploaded reflection or document.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingStatus {
    #[default]
    Queued,
    Processing,
    Complete,
    Failed,
    #[serde(other)]
    Unknown,
}

/// An AI-generated session insight.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[skip_serializing_none]
pub struct InsightItem {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub session_date: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub generated_at: Option<OffsetDateTime>,
    pub confidence: Option<f32>,
    #[serde(default)]
    pub review_status: ReviewStatus,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default)]
    pub actionable: bool,
    pub rating: Option<u8>,
}

/// A member-authored reflection awaiting (or finished with) analysis.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[skip_serializing_none]
pub struct ReflectionItem {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub session_date: Option<OffsetDateTime>,
    #[serde(default)]
    pub processing_status: ProcessingStatus,
    #[serde(default)]
    pub insight_count: u32,
}

/// One entry of the journey feed, discriminated by the wire `type` field.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeedItem {
    Insight(InsightItem),
    Reflection(ReflectionItem),
}

impl FeedItem {
    pub fn id(&self) -> Uuid {
        match self {
            FeedItem::Insight(item) => item.id,
            FeedItem::Reflection(item) => item.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            FeedItem::Insight(item) => &item.title,
            FeedItem::Reflection(item) => &item.title,
        }
    }

    pub fn created_at(&self) -> OffsetDateTime {
        match self {
            FeedItem::Insight(item) => item.created_at,
            FeedItem::Reflection(item) => item.created_at,
        }
    }

    /// Session date when the backend recorded one, otherwise creation time.
    pub fn effective_date(&self) -> OffsetDateTime {
        let session_date = match self {
            FeedItem::Insight(item) => item.session_date,
            FeedItem::Reflection(item) => item.session_date,
        };
        session_date.unwrap_or_else(|| self.created_at())
    }

    /// Whether a detail view exists for this entry. Reflections only become
    /// navigable once analysis produced at least one insight.
    pub fn has_insight(&self) -> bool {
        match self {
            FeedItem::Insight(_) => true,
            FeedItem::Reflection(item) => item.insight_count > 0,
        }
    }
}

/// Histogram facets the backend may attach to a feed page.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct FeedFacets {
    #[serde(default)]
    pub categories: BTreeMap<String, u64>,
    #[serde(default)]
    pub tags: BTreeMap<String, u64>,
    #[serde(default)]
    pub statuses: BTreeMap<String, u64>,
}

/// Offset-paged listing envelope.
///
/// Invariant: `items.len() <= limit`. `skip` echoes the requested offset.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[skip_serializing_none]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub skip: u64,
    pub limit: u64,
    pub facets: Option<FeedFacets>,
}

pub type FeedPage = Page<FeedItem>;
