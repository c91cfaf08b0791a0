//! Curated strategies for feeds that have no user-supplied query.
//!
//! The catalog has no generic "trending" or "random" primitive that returns
//! song-only results across regions, so these feeds are built from chart
//! buckets and small fixed query pools.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::SeedableRng;

use crate::catalog::RawRecord;
use crate::model::Track;

/// Mood/genre terms the random feed draws from.
pub const RANDOM_QUERY_POOL: &[&str] = &["pop", "rock", "chill", "romantic", "lofi"];

/// Search used when the chart has no new-release bucket.
pub const NEW_RELEASES_QUERY: &str = "new music this week";

/// Per-endpoint caps, applied to the normalized list.
pub mod limits {
    pub const SEARCH: usize = 20;
    pub const SEARCH_SONGS: usize = 25;
    pub const SEARCH_ALBUMS: usize = 10;
    pub const SEARCH_ARTISTS: usize = 5;
    pub const SIMILAR: usize = 10;
    pub const RANDOM: usize = 15;
    pub const TRENDING: usize = 20;
    pub const NEW_RELEASES: usize = 20;
    pub const ARTIST_TOP_SONGS: usize = 10;
    pub const ARTIST_ALBUMS: usize = 6;
    pub const ARTIST_SINGLES: usize = 6;
}

/// Where discovery feeds get their randomness.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Randomness {
    #[default]
    Entropy,
    /// Fixed seed; every request sees the same sequence.
    Seeded(u64),
}

impl Randomness {
    /// A fresh generator per request; nothing is shared between requests.
    pub fn rng(self) -> StdRng {
        match self {
            Randomness::Entropy => StdRng::from_rng(&mut rand::rng()),
            Randomness::Seeded(seed) => StdRng::seed_from_u64(seed),
        }
    }
}

pub fn pick_random_query(rng: &mut StdRng) -> &'static str {
    RANDOM_QUERY_POOL.choose(rng).copied().unwrap_or("pop")
}

/// Shuffles before truncating: search results are relevance-ordered and would
/// otherwise come back identical for the same query.
pub fn shuffle_and_take(mut tracks: Vec<Track>, limit: usize, rng: &mut StdRng) -> Vec<Track> {
    tracks.shuffle(rng);
    tracks.truncate(limit);
    tracks
}

/// Chart bucket holding song entries.
pub fn trending_bucket(charts: &RawRecord) -> Vec<RawRecord> {
    charts.section("songs")
}

/// Chart bucket holding new releases; the provider nests it differently by version.
pub fn new_release_bucket(charts: &RawRecord) -> Vec<RawRecord> {
    ["new_releases", "albums.new_releases", "new_releases.albums"]
        .iter()
        .map(|path| charts.section(path))
        .find(|bucket| !bucket.is_empty())
        .unwrap_or_default()
}

/// Query for "songs like this one" from the seed's song details: title and
/// author, or whichever of the two is present.
pub fn similarity_query(song: &RawRecord) -> Option<String> {
    let title = song.str("videoDetails.title").map(str::trim).filter(|s| !s.is_empty());
    let author = song.str("videoDetails.author").map(str::trim).filter(|s| !s.is_empty());
    match (title, author) {
        (Some(t), Some(a)) => Some(format!("{} {}", t, a)),
        (Some(only), None) | (None, Some(only)) => Some(only.to_string()),
        (None, None) => None,
    }
}

/// Drops every track with the seed's id. The seed never appears in its own list.
pub fn exclude_seed(tracks: Vec<Track>, seed_id: &str) -> Vec<Track> {
    tracks.into_iter().filter(|t| t.id != seed_id).collect()
}

/// Keeps the first occurrence of each video id. Tracks without an id are kept.
pub fn dedup_tracks(tracks: Vec<Track>) -> Vec<Track> {
    let mut seen = HashSet::new();
    tracks
        .into_iter()
        .filter(|t| t.id.is_empty() || seen.insert(t.id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn track(id: &str) -> Track {
        Track {
            id: id.into(),
            ..Track::default()
        }
    }

    #[test]
    fn test_seeded_randomness_is_deterministic() {
        let a = pick_random_query(&mut Randomness::Seeded(7).rng());
        let b = pick_random_query(&mut Randomness::Seeded(7).rng());
        assert_eq!(a, b);
        assert!(RANDOM_QUERY_POOL.contains(&a));
    }

    #[test]
    fn test_shuffle_and_take_caps_and_keeps_members() {
        let tracks: Vec<Track> = (0..40).map(|i| track(&format!("v{i}"))).collect();
        let out = shuffle_and_take(tracks.clone(), limits::RANDOM, &mut Randomness::Seeded(1).rng());
        assert_eq!(out.len(), limits::RANDOM);
        assert!(out.iter().all(|t| tracks.contains(t)));
        assert!(shuffle_and_take(vec![], 15, &mut Randomness::Seeded(1).rng()).is_empty());
    }

    #[test]
    fn test_new_release_bucket_fallbacks() {
        let flat = RawRecord::new(json!({ "new_releases": [{ "title": "a" }] }));
        assert_eq!(new_release_bucket(&flat).len(), 1);
        let nested = RawRecord::new(json!({ "albums": { "new_releases": { "items": [{}, {}] } } }));
        assert_eq!(new_release_bucket(&nested).len(), 2);
        assert!(new_release_bucket(&RawRecord::new(json!({ "songs": [] }))).is_empty());
    }

    #[test]
    fn test_trending_bucket_accepts_items_object() {
        let charts = RawRecord::new(json!({ "songs": { "playlist": "VL", "items": [{}, {}, {}] } }));
        assert_eq!(trending_bucket(&charts).len(), 3);
    }

    #[test]
    fn test_similarity_query() {
        let both = RawRecord::new(json!({ "videoDetails": { "title": "Song", "author": "Band" } }));
        assert_eq!(similarity_query(&both).as_deref(), Some("Song Band"));
        let author_only = RawRecord::new(json!({ "videoDetails": { "author": "Band", "title": " " } }));
        assert_eq!(similarity_query(&author_only).as_deref(), Some("Band"));
        assert_eq!(similarity_query(&RawRecord::new(json!({ "videoDetails": {} }))), None);
    }

    #[test]
    fn test_exclude_seed_removes_all_copies() {
        let out = exclude_seed(vec![track("seed"), track("a"), track("seed"), track("b")], "seed");
        assert_eq!(out.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_dedup_keeps_first_and_idless() {
        let out = dedup_tracks(vec![track("a"), track(""), track("a"), track(""), track("b")]);
        assert_eq!(out.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(), vec!["a", "", "", "b"]);
    }
}
