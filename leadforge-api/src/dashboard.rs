//! Dashboard, lead magnet and template endpoints.

use leadforge_client::{endpoints, AuthClient, ClientResult};
use leadforge_core::{DashboardStats, LeadMagnet, Template};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::info;

/// List endpoints answer with a bare array or, when pagination is on,
/// with `{"results": [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Listing<T> {
    Plain(Vec<T>),
    Paged { results: Vec<T> },
}

impl<T> Listing<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Self::Plain(items) | Self::Paged { results: items } => items,
        }
    }
}

/// Read-mostly data for the dashboard.
#[derive(Debug, Clone)]
pub struct DashboardApi {
    client: AuthClient,
}

impl DashboardApi {
    /// Create the API on top of `client`.
    pub fn new(client: AuthClient) -> Self {
        Self { client }
    }

    /// `GET /api/dashboard/`
    pub async fn stats(&self) -> ClientResult<DashboardStats> {
        self.client.get_json(endpoints::DASHBOARD).await
    }

    /// `GET /api/lead-magnets/`
    pub async fn lead_magnets(&self) -> ClientResult<Vec<LeadMagnet>> {
        self.list(endpoints::LEAD_MAGNETS).await
    }

    /// `GET /api/templates/`
    pub async fn templates(&self) -> ClientResult<Vec<Template>> {
        self.list(endpoints::TEMPLATES).await
    }

    /// `DELETE /api/lead-magnets/:id/`
    ///
    /// Ids that are not a plain path segment fail validation without a request.
    pub async fn delete_lead_magnet(&self, id: &str) -> ClientResult<()> {
        self.client.delete(&endpoints::lead_magnet(id)?).await?;
        info!(lead_magnet_id = %id, "Lead magnet deleted");
        Ok(())
    }

    async fn list<T: DeserializeOwned>(&self, path: &str) -> ClientResult<Vec<T>> {
        let listing: Listing<T> = self.client.get_json(path).await?;
        Ok(listing.into_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::client_for;
    use leadforge_core::SessionCredentials;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_stats() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(endpoints::DASHBOARD))
            .and(header("authorization", "Bearer a1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_lead_magnets": 4,
                "active_lead_magnets": 2,
                "total_downloads": 120,
            })))
            .mount(&server)
            .await;

        let (client, _) = client_for(&server, SessionCredentials::new("a1", "r1"));
        let stats = DashboardApi::new(client).stats().await.unwrap();
        assert_eq!(stats.total_lead_magnets, Some(4));
        assert_eq!(stats.total_downloads, Some(120));
    }

    #[tokio::test]
    async fn test_lead_magnets_plain_and_paged() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(endpoints::LEAD_MAGNETS))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": 1, "title": "Tax Guide" },
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(endpoints::TEMPLATES))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 1,
                "results": [{ "id": "modern-guide", "name": "Modern Guide" }],
            })))
            .mount(&server)
            .await;

        let (client, _) = client_for(&server, SessionCredentials::new("a1", "r1"));
        let api = DashboardApi::new(client);

        let magnets = api.lead_magnets().await.unwrap();
        assert_eq!(magnets.len(), 1);
        assert_eq!(magnets[0].id, "1");

        let templates = api.templates().await.unwrap();
        assert_eq!(templates[0].id, "modern-guide");
        assert_eq!(templates[0].name, "Modern Guide");
    }

    #[tokio::test]
    async fn test_delete_lead_magnet() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/lead-magnets/42/"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let (client, _) = client_for(&server, SessionCredentials::new("a1", "r1"));
        DashboardApi::new(client).delete_lead_magnet("42").await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_rejects_path_traversal_id() {
        let server = MockServer::start().await;
        let (client, _) = client_for(&server, SessionCredentials::new("a1", "r1"));

        let err = DashboardApi::new(client)
            .delete_lead_magnet("../../firm-profile")
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_expired_session_refreshes_before_dashboard() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(endpoints::DASHBOARD))
            .and(header("authorization", "Bearer expired"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(endpoints::TOKEN_REFRESH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access": "fresh" })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(endpoints::DASHBOARD))
            .and(header("authorization", "Bearer fresh"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "total_lead_magnets": 1 })))
            .expect(1)
            .mount(&server)
            .await;

        let (client, _) = client_for(&server, SessionCredentials::new("expired", "r1"));
        let stats = DashboardApi::new(client).stats().await.unwrap();
        assert_eq!(stats.total_lead_magnets, Some(1));
    }
}
