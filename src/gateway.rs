//! Per-endpoint orchestration: fetch raw records, normalize, dedup, truncate.
//!
//! Every list is truncated by slicing the normalized results; upstream page
//! sizes are never relied on.

use std::sync::Arc;

use crate::catalog::{CatalogProvider, RawRecord, SearchFilter};
use crate::discovery::{self, limits, Randomness};
use crate::error::AppError;
use crate::model::{Album, ArtistProfile, ArtistSummary, AudioStream, Track};
use crate::normalize::{
    album_from, artist_profile_from, artist_summary_from, track_from, ProfileLimits, ThumbnailMode,
};
use crate::stream::StreamResolver;

pub const DEFAULT_CHART_COUNTRY: &str = "IN";

/// Shared, immutable service handle. Cloning is cheap; upstream clients are
/// reference-counted and must tolerate concurrent use.
#[derive(Clone)]
pub struct Gateway {
    catalog: Arc<dyn CatalogProvider>,
    streams: Arc<dyn StreamResolver>,
    chart_country: String,
    randomness: Randomness,
}

fn tracks(records: &[RawRecord], mode: ThumbnailMode) -> Vec<Track> {
    records.iter().map(|r| track_from(r, mode)).collect()
}

fn capped(tracks: Vec<Track>, limit: usize) -> Vec<Track> {
    let mut tracks = discovery::dedup_tracks(tracks);
    tracks.truncate(limit);
    tracks
}

impl Gateway {
    pub fn new(catalog: Arc<dyn CatalogProvider>, streams: Arc<dyn StreamResolver>) -> Self {
        Self {
            catalog,
            streams,
            chart_country: DEFAULT_CHART_COUNTRY.into(),
            randomness: Randomness::default(),
        }
    }

    pub fn with_chart_country(mut self, country: impl Into<String>) -> Self {
        self.chart_country = country.into();
        self
    }

    pub fn with_randomness(mut self, randomness: Randomness) -> Self {
        self.randomness = randomness;
        self
    }

    /// Unfiltered search, keeping song results only.
    pub async fn search(&self, query: &str) -> Result<Vec<Track>, AppError> {
        let results = self.catalog.search(query, SearchFilter::Unfiltered).await?;
        let songs: Vec<RawRecord> = results
            .into_iter()
            .filter(|r| r.str("resultType") == Some("song"))
            .collect();
        Ok(capped(tracks(&songs, ThumbnailMode::Original), limits::SEARCH))
    }

    pub async fn search_songs(&self, query: &str) -> Result<Vec<Track>, AppError> {
        let results = self.catalog.search(query, SearchFilter::Songs).await?;
        Ok(capped(tracks(&results, ThumbnailMode::Original), limits::SEARCH_SONGS))
    }

    pub async fn search_albums(&self, query: &str) -> Result<Vec<Album>, AppError> {
        let results = self.catalog.search(query, SearchFilter::Albums).await?;
        Ok(results
            .iter()
            .take(limits::SEARCH_ALBUMS)
            .map(|r| album_from(r, ThumbnailMode::Original))
            .collect())
    }

    pub async fn search_artists(&self, query: &str) -> Result<Vec<ArtistSummary>, AppError> {
        let results = self.catalog.search(query, SearchFilter::Artists).await?;
        Ok(results
            .iter()
            .take(limits::SEARCH_ARTISTS)
            .map(|r| artist_summary_from(r, ThumbnailMode::Original))
            .collect())
    }

    pub async fn audio(&self, watch_url: &str) -> Result<AudioStream, AppError> {
        let audio_url = self.streams.resolve_audio_url(watch_url).await?;
        tracing::debug!(url = watch_url, "resolved audio stream");
        Ok(AudioStream { audio_url })
    }

    /// Songs like the seed, built from its title and author. The seed itself
    /// is always excluded.
    pub async fn similar_songs(&self, song_id: &str) -> Result<Vec<Track>, AppError> {
        let seed = self.catalog.song(song_id).await?;
        let Some(query) = discovery::similarity_query(&seed) else {
            tracing::debug!(song_id, "seed has neither title nor author");
            return Ok(Vec::new());
        };

        let results = self.catalog.search(&query, SearchFilter::Songs).await?;
        let similar = discovery::exclude_seed(tracks(&results, ThumbnailMode::Original), song_id);
        Ok(capped(similar, limits::SIMILAR))
    }

    pub async fn trending(&self) -> Result<Vec<Track>, AppError> {
        let charts = self.catalog.charts(&self.chart_country).await?;
        let bucket = discovery::trending_bucket(&charts);
        Ok(capped(tracks(&bucket, ThumbnailMode::Normalized), limits::TRENDING))
    }

    /// Chart new releases, or a fixed song search when the chart has none.
    pub async fn new_releases(&self) -> Result<Vec<Track>, AppError> {
        let charts = self.catalog.charts(&self.chart_country).await?;
        let mut bucket = discovery::new_release_bucket(&charts);
        if bucket.is_empty() {
            tracing::info!(country = %self.chart_country, "no chart new releases, falling back to search");
            bucket = self
                .catalog
                .search(discovery::NEW_RELEASES_QUERY, SearchFilter::Songs)
                .await?;
        }
        Ok(capped(tracks(&bucket, ThumbnailMode::Normalized), limits::NEW_RELEASES))
    }

    pub async fn random_songs(&self) -> Result<Vec<Track>, AppError> {
        // One generator per request drives both the query pick and the shuffle.
        let mut rng = self.randomness.rng();
        let query = discovery::pick_random_query(&mut rng);
        tracing::debug!(query, "random feed query");

        let results = self.catalog.search(query, SearchFilter::Songs).await?;
        let songs = discovery::dedup_tracks(tracks(&results, ThumbnailMode::Normalized));
        Ok(discovery::shuffle_and_take(songs, limits::RANDOM, &mut rng))
    }

    pub async fn album(&self, browse_id: &str) -> Result<Album, AppError> {
        let raw = self.catalog.album(browse_id).await?;
        let mut album = album_from(&raw, ThumbnailMode::Original);
        if album.browse_id.is_empty() {
            album.browse_id = browse_id.to_string();
        }
        Ok(album)
    }

    pub async fn song(&self, video_id: &str) -> Result<Track, AppError> {
        let raw = self.catalog.song(video_id).await?;
        Ok(track_from(&raw, ThumbnailMode::Original))
    }

    pub async fn artist(&self, artist_id: &str) -> Result<ArtistProfile, AppError> {
        let raw = self.catalog.artist(artist_id).await?;
        let limits = ProfileLimits {
            top_songs: limits::ARTIST_TOP_SONGS,
            albums: limits::ARTIST_ALBUMS,
            singles: limits::ARTIST_SINGLES,
        };
        Ok(artist_profile_from(&raw, limits, ThumbnailMode::Original))
    }
}
