use serde::Deserialize;
use serde::Serialize;
use serde_with::skip_serializing_none;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::feed::ProcessingStatus;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[skip_serializing_none]
pub struct DocumentSummary {
    pub id: Uuid,
    pub filename: String,
    pub content_type: Option<String>,
    pub size_bytes: u64,
    #[serde(default)]
    pub status: ProcessingStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub uploaded_at: OffsetDateTime,
}
