//! Canonical schema returned to clients.
//!
//! Every entity is built fresh from raw upstream records on each request and
//! owns its nested entries by value.

use serde::Serialize;

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_ALBUM: &str = "Unknown Album";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const ZERO_DURATION: &str = "0:00";
pub const ZERO_VIEWS: &str = "0";

const WATCH_URL_BASE: &str = "https://www.youtube.com/watch?v=";

/// Builds the playable watch-page URL for a video id. Empty id gives an empty URL.
pub fn watch_url(video_id: &str) -> String {
    if video_id.is_empty() {
        String::new()
    } else {
        format!("{}{}", WATCH_URL_BASE, video_id)
    }
}

/// A playable track.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    #[serde(rename = "videoId")]
    pub id: String,
    pub title: String,
    /// Artist names joined with ", ".
    pub artist: String,
    #[serde(rename = "thumbnail")]
    pub thumbnail_url: String,
    #[serde(rename = "url")]
    pub watch_url: String,
    pub album: String,
    #[serde(rename = "duration")]
    pub duration_text: String,
    pub duration_seconds: u64,
    pub views: String,
}

impl Default for Track {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: UNKNOWN_TITLE.into(),
            artist: String::new(),
            thumbnail_url: String::new(),
            watch_url: String::new(),
            album: UNKNOWN_ALBUM.into(),
            duration_text: ZERO_DURATION.into(),
            duration_seconds: 0,
            views: ZERO_VIEWS.into(),
        }
    }
}

/// An album, either as a search/artist summary (no tracks) or a full listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub browse_id: String,
    pub title: String,
    #[serde(rename = "artist")]
    pub artist_name: String,
    #[serde(rename = "thumbnail")]
    pub thumbnail_url: String,
    pub year: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "duration")]
    pub duration_text: String,
    pub track_count: u64,
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistSummary {
    #[serde(rename = "browseId")]
    pub id: String,
    pub name: String,
    #[serde(rename = "thumbnail")]
    pub thumbnail_url: String,
}

/// Image descriptor as the provider lists them, ascending by resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Thumbnail {
    pub url: String,
    pub width: u64,
    pub height: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistProfile {
    pub name: String,
    pub description: String,
    pub thumbnails: Vec<Thumbnail>,
    pub top_songs: Vec<Track>,
    pub albums: Vec<Album>,
    pub singles: Vec<Album>,
    #[serde(rename = "views")]
    pub views_text: String,
    #[serde(rename = "subscribers")]
    pub followers_text: String,
}

/// Resolved direct audio URL. Short-lived; never cached.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioStream {
    pub audio_url: String,
}
