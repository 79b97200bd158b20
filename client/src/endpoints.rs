//! Typed wrappers for every backend endpoint the client consumes.

use reqwest::multipart::Form;
use reqwest::multipart::Part;
use serde_json::json;
use tandem_protocol::DocumentSummary;
use tandem_protocol::FeedFilter;
use tandem_protocol::FeedPage;
use tandem_protocol::InsightItem;
use tandem_protocol::Page;
use tandem_protocol::RelationshipAction;
use tandem_protocol::RelationshipSummary;
use uuid::Uuid;

use crate::api::ApiClient;
use crate::error::ApiError;

pub const JOURNEY_FEED_PATH: &str = "/api/v1/journey/feed";
pub const RELATIONSHIPS_PATH: &str = "/api/v1/member/coaching-relationships";
pub const DOCUMENTS_PATH: &str = "/api/v1/documents/";
pub const HEALTH_PATH: &str = "/api/v1/health";

/// Detail route for a single insight; the navigator pushes this path.
pub fn insight_detail_path(id: Uuid) -> String {
    format!("/insights/{id}")
}

impl ApiClient {
    /// One page of the journey feed. `offset` and `limit` always appear in
    /// the query; filter fields only when set.
    pub async fn fetch_feed_page(
        &self,
        filter: &FeedFilter,
        offset: u64,
        limit: u64,
    ) -> Result<FeedPage, ApiError> {
        let mut query = vec![("offset", offset.to_string()), ("limit", limit.to_string())];
        query.extend(filter.query_pairs());
        Ok(self
            .get_with_query::<FeedPage>(JOURNEY_FEED_PATH, &query)
            .await?
            .data)
    }

    pub async fn list_relationships(&self) -> Result<Page<RelationshipSummary>, ApiError> {
        Ok(self.get(RELATIONSHIPS_PATH).await?.data)
    }

    pub async fn respond_to_relationship(
        &self,
        id: Uuid,
        action: RelationshipAction,
    ) -> Result<RelationshipSummary, ApiError> {
        let path = format!("{RELATIONSHIPS_PATH}/{id}/respond");
        let body = json!({ "action": action.as_str() });
        Ok(self.post_json(&path, body).await?.data)
    }

    pub async fn list_documents(&self) -> Result<Page<DocumentSummary>, ApiError> {
        Ok(self.get(DOCUMENTS_PATH).await?.data)
    }

    /// Multipart upload; the file bytes pass through unchanged under the
    /// `file` form field.
    pub async fn upload_document(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<DocumentSummary, ApiError> {
        let part = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(content_type)?;
        let form = Form::new().part("file", part);
        Ok(self.upload(DOCUMENTS_PATH, form).await?.data)
    }

    pub async fn set_insight_favorite(
        &self,
        id: Uuid,
        favorite: bool,
    ) -> Result<InsightItem, ApiError> {
        let path = format!("/api/v1/insights/{id}/favorite");
        Ok(self
            .post_json(&path, json!({ "favorite": favorite }))
            .await?
            .data)
    }

    pub async fn rate_insight(&self, id: Uuid, rating: u8) -> Result<InsightItem, ApiError> {
        let path = format!("/api/v1/insights/{id}/rating");
        Ok(self
            .post_json(&path, json!({ "rating": rating }))
            .await?
            .data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_path_matches_route_pattern() {
        let id = Uuid::nil();
        assert_eq!(
            insight_detail_path(id),
            "/insights/00000000-0000-0000-0000-000000000000"
        );
    }
}
