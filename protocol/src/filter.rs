use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Field the backend should order feed results by.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    CreatedAt,
    UpdatedAt,
    Confidence,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::CreatedAt => "created_at",
            SortKey::UpdatedAt => "updated_at",
            SortKey::Confidence => "confidence",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client-held feed filter.
///
/// Every field is optional. Absent fields are omitted from the outbound
/// query entirely, never sent as empty strings or `false`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeedFilter {
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub search: Option<String>,
    pub sort_by: Option<SortKey>,
    pub sort_order: Option<SortOrder>,
    pub min_confidence: Option<f32>,
    pub favorites_only: bool,
    pub actionable_only: bool,
    pub created_after: Option<OffsetDateTime>,
    pub created_before: Option<OffsetDateTime>,
}

fn rfc3339(value: OffsetDateTime) -> String {
    value
        .format(&Rfc3339)
        .unwrap_or_else(|_| value.unix_timestamp().to_string())
}

impl FeedFilter {
    /// Query parameters for this filter, in a stable order. Set-valued
    /// filters are comma-joined; timestamps are RFC 3339.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if !self.categories.is_empty() {
            pairs.push(("categories", self.categories.join(",")));
        }
        if !self.tags.is_empty() {
            pairs.push(("tags", self.tags.join(",")));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(sort_by) = self.sort_by {
            pairs.push(("sort_by", sort_by.as_str().to_string()));
        }
        if let Some(sort_order) = self.sort_order {
            pairs.push(("sort_order", sort_order.as_str().to_string()));
        }
        if let Some(min_confidence) = self.min_confidence {
            pairs.push(("min_confidence", min_confidence.to_string()));
        }
        if self.favorites_only {
            pairs.push(("favorites_only", "true".to_string()));
        }
        if self.actionable_only {
            pairs.push(("actionable_only", "true".to_string()));
        }
        if let Some(created_after) = self.created_after {
            pairs.push(("created_after", rfc3339(created_after)));
        }
        if let Some(created_before) = self.created_before {
            pairs.push(("created_before", rfc3339(created_before)));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use time::macros::datetime;

    #[test]
    fn empty_filter_produces_no_pairs() {
        assert_eq!(FeedFilter::default().query_pairs(), Vec::new());
    }

    #[test]
    fn false_booleans_are_omitted() {
        let filter = FeedFilter {
            favorites_only: false,
            actionable_only: true,
            ..Default::default()
        };
        assert_eq!(
            filter.query_pairs(),
            vec![("actionable_only", "true".to_string())]
        );
    }

    #[test]
    fn set_values_are_comma_joined() {
        let filter = FeedFilter {
            categories: vec![
                "understanding_myself".to_string(),
                "relationships".to_string(),
            ],
            tags: vec!["communication".to_string()],
            ..Default::default()
        };
        assert_eq!(
            filter.query_pairs(),
            vec![
                ("categories", "understanding_myself,relationships".to_string()),
                ("tags", "communication".to_string()),
            ]
        );
    }

    #[test]
    fn timestamps_render_as_rfc3339() {
        let filter = FeedFilter {
            created_after: Some(datetime!(2025-10-01 00:00 UTC)),
            ..Default::default()
        };
        assert_eq!(
            filter.query_pairs(),
            vec![("created_after", "2025-10-01T00:00:00Z".to_string())]
        );
    }

    #[test]
    fn full_filter_keeps_stable_key_order() {
        let filter = FeedFilter {
            categories: vec!["career".to_string()],
            tags: vec!["focus".to_string()],
            search: Some("deadline".to_string()),
            sort_by: Some(SortKey::Confidence),
            sort_order: Some(SortOrder::Desc),
            min_confidence: Some(0.5),
            favorites_only: true,
            actionable_only: false,
            created_after: None,
            created_before: None,
        };
        let keys: Vec<&str> = filter.query_pairs().into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                "categories",
                "tags",
                "search",
                "sort_by",
                "sort_order",
                "min_confidence",
                "favorites_only"
            ]
        );
    }
}
