//! Catalog provider: search, charts and album/artist/song lookups.
//!
//! The provider hands back raw records; normalization happens elsewhere.

mod client;
mod record;

pub use client::CatalogClient;
pub use record::RawRecord;

use async_trait::async_trait;

/// Result kind to restrict a search to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchFilter {
    Songs,
    Albums,
    Artists,
    Unfiltered,
}

impl SearchFilter {
    /// Query value understood by the catalog service; `None` means no filter.
    pub fn as_param(self) -> Option<&'static str> {
        match self {
            SearchFilter::Songs => Some("songs"),
            SearchFilter::Albums => Some("albums"),
            SearchFilter::Artists => Some("artists"),
            SearchFilter::Unfiltered => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("search query cannot be empty")]
    InvalidQuery,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unavailable(String),
}

/// Read-only access to the catalog. Implementations must be safe to share
/// across concurrent requests; no retries happen at this layer.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn search(&self, query: &str, filter: SearchFilter) -> Result<Vec<RawRecord>, CatalogError>;

    /// Chart bundle for a region: `songs` and new-release buckets, any of which may be absent.
    async fn charts(&self, country: &str) -> Result<RawRecord, CatalogError>;

    async fn album(&self, browse_id: &str) -> Result<RawRecord, CatalogError>;

    async fn artist(&self, artist_id: &str) -> Result<RawRecord, CatalogError>;

    /// Song details; carries a `videoDetails` object when the id resolves.
    async fn song(&self, video_id: &str) -> Result<RawRecord, CatalogError>;
}
