//! HTTP client for the catalog service.
//!
//! The service exposes the provider's search/chart/browse calls as plain JSON
//! endpoints and answers 404 for identifiers it cannot resolve.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use super::{CatalogError, CatalogProvider, RawRecord, SearchFilter};

/// Catalog client sharing one connection pool across all requests.
#[derive(Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, what: &str) -> Result<T, CatalogError> {
        tracing::debug!(%url, "catalog request");

        let res = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CatalogError::Unavailable(format!("{} request failed: {}", what, e)))?;

        let status = res.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(format!("{} not found", what)));
        }
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(CatalogError::Unavailable(format!("catalog error {}: {}", status, body)));
        }

        res.json()
            .await
            .map_err(|e| CatalogError::Unavailable(format!("{} parse failed: {}", what, e)))
    }

    fn lookup_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{}/{}", self.base_url, collection, urlencoding::encode(id))
    }
}

#[async_trait]
impl CatalogProvider for CatalogClient {
    async fn search(&self, query: &str, filter: SearchFilter) -> Result<Vec<RawRecord>, CatalogError> {
        if query.trim().is_empty() {
            return Err(CatalogError::InvalidQuery);
        }

        let mut url = format!("{}/search?query={}", self.base_url, urlencoding::encode(query));
        if let Some(filter) = filter.as_param() {
            url.push_str("&filter=");
            url.push_str(filter);
        }

        let results: Vec<RawRecord> = self.get_json(&url, "search").await?;
        tracing::debug!(query, ?filter, count = results.len(), "catalog search");
        Ok(results)
    }

    async fn charts(&self, country: &str) -> Result<RawRecord, CatalogError> {
        let url = format!("{}/charts?country={}", self.base_url, urlencoding::encode(country));
        self.get_json(&url, "charts").await
    }

    async fn album(&self, browse_id: &str) -> Result<RawRecord, CatalogError> {
        self.get_json(&self.lookup_url("albums", browse_id), "album").await
    }

    async fn artist(&self, artist_id: &str) -> Result<RawRecord, CatalogError> {
        self.get_json(&self.lookup_url("artists", artist_id), "artist").await
    }

    async fn song(&self, video_id: &str) -> Result<RawRecord, CatalogError> {
        let song: RawRecord = self.get_json(&self.lookup_url("songs", video_id), "song").await?;
        // Unknown or unplayable ids come back as a bare playability status.
        if !song.has("videoDetails") {
            return Err(CatalogError::NotFound("song not found".into()));
        }
        Ok(song)
    }
}
