use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};

use crate::core::venues::{
    parse_venue, parse_venues, ApiVenue, DirectoryError, VenueDirectory, VenueRecord,
};

/// Production endpoint of the venue directory service.
pub const DEFAULT_BASE_URL: &str = "https://api.ffxivvenues.com/venue";

/// HTTP client for the external venue directory. It deliberately exposes only
/// the read paths the core layer needs; this bot never writes to the service.
pub struct VenueDirectoryClient {
    client: Client,
    base_url: String,
}

impl VenueDirectoryClient {
    pub fn new() -> Result<Self, DirectoryError> {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    /// Point the client at a different base URL (tests, staging).
    pub fn with_base_url(base_url: String) -> Result<Self, DirectoryError> {
        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        headers.insert(
            "User-Agent",
            HeaderValue::from_static("VenueDirectoryBot/1.0"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| DirectoryError::Transport(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// One GET against the listing endpoint, with optional query parameters.
    /// Any non-success status is terminal for the call; there is no retry.
    async fn fetch_list(
        &self,
        query: &[(&str, String)],
    ) -> Result<Vec<VenueRecord>, DirectoryError> {
        let resp = self
            .client
            .get(&self.base_url)
            .query(query)
            .send()
            .await
            .map_err(|e| DirectoryError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(DirectoryError::Upstream {
                status: status.as_u16(),
            });
        }

        let raw: Vec<ApiVenue> = resp
            .json()
            .await
            .map_err(|e| DirectoryError::Transport(e.to_string()))?;
        Ok(parse_venues(raw)?)
    }
}

#[async_trait]
impl VenueDirectory for VenueDirectoryClient {
    async fn fetch_by_manager(
        &self,
        manager_id: u64,
    ) -> Result<Vec<VenueRecord>, DirectoryError> {
        tracing::debug!("Fetching venues for manager {manager_id}");
        let venues = self
            .fetch_list(&[("manager", manager_id.to_string())])
            .await?;
        tracing::info!("Manager {manager_id} has {} venue(s)", venues.len());
        Ok(venues)
    }

    async fn fetch_by_id(&self, venue_id: &str) -> Result<Option<VenueRecord>, DirectoryError> {
        tracing::debug!("Fetching venue {venue_id}");
        let url = format!("{}/{}", self.base_url, venue_id);
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DirectoryError::Transport(e.to_string()))?;

        // The service's "no such venue" answer. Absent, not an error.
        if resp.status() == StatusCode::NOT_FOUND {
            tracing::debug!("Venue {venue_id} not found");
            return Ok(None);
        }

        let status = resp.status();
        if !status.is_success() {
            return Err(DirectoryError::Upstream {
                status: status.as_u16(),
            });
        }

        let raw: ApiVenue = resp
            .json()
            .await
            .map_err(|e| DirectoryError::Transport(e.to_string()))?;
        Ok(Some(parse_venue(raw)?))
    }

    async fn fetch_all(&self) -> Result<Vec<VenueRecord>, DirectoryError> {
        tracing::debug!("Fetching the full venue directory");
        // No pagination on the service side; the whole listing comes back in
        // one response and is parsed in a single pass.
        let venues = self.fetch_list(&[]).await?;
        tracing::info!("Directory listed {} venue(s)", venues.len());
        Ok(venues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn venue_body(id: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": "Test Venue",
            "managers": ["42"],
            "sfw": true
        })
    }

    #[tokio::test]
    async fn test_fetch_by_id_404_yields_absent() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/missing-venue")
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status": 404}"#)
            .create_async()
            .await;

        let client = VenueDirectoryClient::with_base_url(server.url()).unwrap();
        let result = client.fetch_by_id("missing-venue").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_fetch_by_id_success() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/cafe-aether")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(venue_body("cafe-aether").to_string())
            .create_async()
            .await;

        let client = VenueDirectoryClient::with_base_url(server.url()).unwrap();
        let venue = client.fetch_by_id("cafe-aether").await.unwrap().unwrap();
        assert_eq!(venue.id, "cafe-aether");
        assert_eq!(venue.managers, vec![42]);
    }

    #[tokio::test]
    async fn test_server_error_carries_status() {
        let mut server = Server::new_async().await;
        let _bulk = server
            .mock("GET", "/")
            .with_status(500)
            .create_async()
            .await;
        let _single = server
            .mock("GET", "/any")
            .with_status(500)
            .create_async()
            .await;

        let client = VenueDirectoryClient::with_base_url(server.url()).unwrap();

        let err = client.fetch_all().await.unwrap_err();
        assert!(matches!(err, DirectoryError::Upstream { status: 500 }));

        let err = client.fetch_by_id("any").await.unwrap_err();
        assert!(matches!(err, DirectoryError::Upstream { status: 500 }));
    }

    #[tokio::test]
    async fn test_fetch_by_manager_queries_and_parses() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/")
            .match_query(Matcher::UrlEncoded("manager".into(), "42".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!([venue_body("a"), venue_body("b")]).to_string())
            .create_async()
            .await;

        let client = VenueDirectoryClient::with_base_url(server.url()).unwrap();
        let venues = client.fetch_by_manager(42).await.unwrap();
        assert_eq!(venues.len(), 2);
        assert_eq!(venues[0].id, "a");
    }

    #[tokio::test]
    async fn test_zero_matches_is_an_empty_list() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/")
            .match_query(Matcher::UrlEncoded("manager".into(), "7".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create_async()
            .await;

        let client = VenueDirectoryClient::with_base_url(server.url()).unwrap();
        let venues = client.fetch_by_manager(7).await.unwrap();
        assert!(venues.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_record_fails_the_fetch() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!([{"id": "x", "name": "No Managers"}]).to_string())
            .create_async()
            .await;

        let client = VenueDirectoryClient::with_base_url(server.url()).unwrap();
        let err = client.fetch_all().await.unwrap_err();
        assert!(matches!(err, DirectoryError::Parse(_)));
    }
}
