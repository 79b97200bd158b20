use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_with::skip_serializing_none;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipStatus {
    Pending,
    Active,
    Declined,
    Ended,
    #[serde(other)]
    Unknown,
}

/// Member's answer to a pending coaching invitation.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipAction {
    Accept,
    Decline,
}

impl RelationshipAction {
    pub fn as_str(self) -> &'static str {
        match self {
            RelationshipAction::Accept => "accept",
            RelationshipAction::Decline => "decline",
        }
    }
}

impl fmt::Display for RelationshipAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[skip_serializing_none]
pub struct RelationshipSummary {
    pub id: Uuid,
    pub coach_name: String,
    pub member_name: Option<String>,
    pub status: RelationshipStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
