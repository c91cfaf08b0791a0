//! Per-field fallback chains from raw catalog records to the canonical schema.
//!
//! Every function here is total: any record, including an empty one or a
//! non-object value, produces a fully populated result.

use crate::catalog::RawRecord;
use crate::model::{
    watch_url, Album, ArtistProfile, ArtistSummary, Track, UNKNOWN_ALBUM, UNKNOWN_ARTIST, UNKNOWN_TITLE,
    ZERO_DURATION, ZERO_VIEWS,
};

use super::thumbnail::{best_thumbnail, thumbnail_list, ThumbnailMode};

const VIDEO_ID: &[&str] = &["videoId", "videoDetails.videoId"];
const TITLE: &[&str] = &["title", "videoDetails.title"];
const ARTIST_TEXT: &[&str] = &["artist", "author", "videoDetails.author"];
const SECONDS: &[&str] = &["duration_seconds", "lengthSeconds", "videoDetails.lengthSeconds"];
const VIEWS: &[&str] = &["views", "viewCount", "videoDetails.viewCount"];
const THUMBNAILS: &[&str] = &["thumbnails", "thumbnail.thumbnails", "videoDetails.thumbnail.thumbnails"];
const ALBUM_BROWSE_ID: &[&str] = &["browseId", "audioPlaylistId"];
const ARTIST_NAME: &[&str] = &["artist", "name", "title"];

/// Joins the `name` of every artist descriptor with ", ", skipping nameless ones.
pub fn artist_names(artists: &[RawRecord]) -> String {
    artists
        .iter()
        .filter_map(|a| a.str("name"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `artists[].name` when any are present, else the single-string artist aliases.
fn artist_of(record: &RawRecord) -> String {
    let joined = artist_names(&record.list("artists"));
    if !joined.is_empty() {
        return joined;
    }
    record
        .text_any(ARTIST_TEXT)
        .unwrap_or_default()
}

fn thumbnail_of(record: &RawRecord, mode: ThumbnailMode) -> String {
    mode.apply(best_thumbnail(&record.list_any(THUMBNAILS)))
}

/// Formats seconds as `m:ss`, or `h:mm:ss` from one hour up.
pub fn format_duration(seconds: u64) -> String {
    let (h, m, s) = (seconds / 3600, (seconds % 3600) / 60, seconds % 60);
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}

/// Parses `m:ss` / `h:mm:ss` text. Returns `None` for anything else,
/// including values that overflow.
pub fn parse_duration(text: &str) -> Option<u64> {
    let parts: Vec<&str> = text.trim().split(':').collect();
    if parts.len() < 2 || parts.len() > 3 {
        return None;
    }
    parts.iter().try_fold(0u64, |acc, part| {
        let n: u64 = part.parse().ok()?;
        acc.checked_mul(60)?.checked_add(n)
    })
}

fn duration_of(record: &RawRecord) -> (String, u64) {
    let text = record.str("duration").map(str::to_string);
    let seconds = record
        .u64_any(SECONDS)
        .or_else(|| text.as_deref().and_then(parse_duration));
    let text = text
        .or_else(|| seconds.map(format_duration))
        .unwrap_or_else(|| ZERO_DURATION.to_string());
    (text, seconds.unwrap_or(0))
}

fn album_name_of(record: &RawRecord) -> String {
    record
        .str("album.name")
        .or_else(|| record.str("album"))
        .unwrap_or(UNKNOWN_ALBUM)
        .to_string()
}

/// Builds a track from a search result, chart entry, album track or song details.
pub fn track_from(record: &RawRecord, mode: ThumbnailMode) -> Track {
    let id = record.text_any(VIDEO_ID).unwrap_or_default();
    let (duration_text, duration_seconds) = duration_of(record);
    Track {
        watch_url: watch_url(&id),
        id,
        title: record.text_any(TITLE).unwrap_or_else(|| UNKNOWN_TITLE.into()),
        artist: artist_of(record),
        thumbnail_url: thumbnail_of(record, mode),
        album: album_name_of(record),
        duration_text,
        duration_seconds,
        views: record.text_any(VIEWS).unwrap_or_else(|| ZERO_VIEWS.into()),
    }
}

/// Builds an album. Track entries inherit the album title and artwork when
/// they carry none of their own, which is how the provider lists album tracks.
pub fn album_from(record: &RawRecord, mode: ThumbnailMode) -> Album {
    let title = record.str("title").unwrap_or(UNKNOWN_ALBUM).to_string();
    let thumbnail_url = thumbnail_of(record, mode);
    let artist_name = artist_of(record);

    let tracks: Vec<Track> = record
        .list("tracks")
        .iter()
        .map(|raw| {
            let mut track = track_from(raw, mode);
            if !raw.has("album") {
                track.album = title.clone();
            }
            if track.thumbnail_url.is_empty() {
                track.thumbnail_url = thumbnail_url.clone();
            }
            if track.artist.is_empty() {
                track.artist = artist_name.clone();
            }
            track
        })
        .collect();

    Album {
        browse_id: record.text_any(ALBUM_BROWSE_ID).unwrap_or_default(),
        track_count: record.u64("trackCount").unwrap_or(tracks.len() as u64),
        duration_text: record.text("duration").unwrap_or_default(),
        year: record.text("year").unwrap_or_default(),
        kind: record.str("type").unwrap_or("Album").to_string(),
        title,
        artist_name,
        thumbnail_url,
        tracks,
    }
}

pub fn artist_summary_from(record: &RawRecord, mode: ThumbnailMode) -> ArtistSummary {
    ArtistSummary {
        id: record.text("browseId").unwrap_or_default(),
        name: record.text_any(ARTIST_NAME).unwrap_or_else(|| UNKNOWN_ARTIST.into()),
        thumbnail_url: thumbnail_of(record, mode),
    }
}

/// Caps applied to the shelves of an artist page.
#[derive(Clone, Copy, Debug)]
pub struct ProfileLimits {
    pub top_songs: usize,
    pub albums: usize,
    pub singles: usize,
}

pub fn artist_profile_from(record: &RawRecord, limits: ProfileLimits, mode: ThumbnailMode) -> ArtistProfile {
    let name = record.text_any(ARTIST_NAME).unwrap_or_else(|| UNKNOWN_ARTIST.into());

    let top_songs = record
        .section("songs")
        .iter()
        .take(limits.top_songs)
        .map(|raw| track_from(raw, mode))
        .collect();
    let shelf = |key: &str, limit: usize| -> Vec<Album> {
        record
            .section(key)
            .iter()
            .take(limit)
            .map(|raw| {
                let mut album = album_from(raw, mode);
                if album.artist_name.is_empty() {
                    album.artist_name = name.clone();
                }
                album
            })
            .collect()
    };

    ArtistProfile {
        description: record.text("description").unwrap_or_default(),
        thumbnails: thumbnail_list(&record.list_any(THUMBNAILS)),
        top_songs,
        albums: shelf("albums", limits.albums),
        singles: shelf("singles", limits.singles),
        views_text: record.text("views").unwrap_or_default(),
        followers_text: record.text_any(&["subscribers", "followers"]).unwrap_or_default(),
        name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn rec(v: Value) -> RawRecord {
        RawRecord::new(v)
    }

    #[test]
    fn test_artist_names_absent_empty_or_nameless() {
        assert_eq!(artist_names(&[]), "");
        let r = rec(json!({ "artists": [{ "id": "x" }, { "name": "A" }, "junk", { "name": null }, { "name": "B" }] }));
        assert_eq!(artist_names(&r.list("artists")), "A, B");
        assert_eq!(artist_names(&rec(json!({})).list("artists")), "");
        assert_eq!(artist_names(&rec(json!({ "artists": "nope" })).list("artists")), "");
    }

    #[test]
    fn test_track_from_empty_record_uses_defaults() {
        assert_eq!(track_from(&rec(json!({})), ThumbnailMode::Original), Track::default());
        assert_eq!(track_from(&rec(Value::Null), ThumbnailMode::Normalized), Track::default());
    }

    #[test]
    fn test_track_from_search_result() {
        let r = rec(json!({
            "resultType": "song",
            "videoId": "dQw4w9WgXcQ",
            "title": "Never Gonna Give You Up",
            "artists": [{ "name": "Rick Astley", "id": "UC1" }],
            "album": { "name": "Whenever You Need Somebody", "id": "MPRE1" },
            "duration": "3:33",
            "duration_seconds": 213,
            "thumbnails": [
                { "url": "https://lh3/x=w60-h60", "width": 60 },
                { "url": "https://lh3/x=w120-h120", "width": 120 }
            ],
        }));
        let t = track_from(&r, ThumbnailMode::Original);
        assert_eq!(t.id, "dQw4w9WgXcQ");
        assert_eq!(t.watch_url, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(t.artist, "Rick Astley");
        assert_eq!(t.album, "Whenever You Need Somebody");
        assert_eq!(t.duration_text, "3:33");
        assert_eq!(t.duration_seconds, 213);
        assert_eq!(t.thumbnail_url, "https://lh3/x=w120-h120");
        assert_eq!(t.views, "0");

        let t = track_from(&r, ThumbnailMode::Normalized);
        assert_eq!(t.thumbnail_url, "https://lh3/x");
    }

    #[test]
    fn test_track_from_song_details() {
        let r = rec(json!({
            "videoDetails": {
                "videoId": "abc",
                "title": "Song",
                "author": "Someone",
                "lengthSeconds": "245",
                "viewCount": "1000",
                "thumbnail": { "thumbnails": [{ "url": "https://i.ytimg.com/a.jpg" }] }
            }
        }));
        let t = track_from(&r, ThumbnailMode::Original);
        assert_eq!(t.id, "abc");
        assert_eq!(t.title, "Song");
        assert_eq!(t.artist, "Someone");
        assert_eq!(t.duration_seconds, 245);
        assert_eq!(t.duration_text, "4:05");
        assert_eq!(t.views, "1000");
        assert_eq!(t.thumbnail_url, "https://i.ytimg.com/a.jpg");
        assert_eq!(t.album, UNKNOWN_ALBUM);
    }

    #[test]
    fn test_chart_entry_without_video_id_has_empty_url() {
        let t = track_from(&rec(json!({ "title": "X", "browseId": "MPRE" })), ThumbnailMode::Normalized);
        assert_eq!(t.id, "");
        assert_eq!(t.watch_url, "");
    }

    #[test]
    fn test_duration_text_derives_seconds() {
        let t = track_from(&rec(json!({ "duration": "1:02:03" })), ThumbnailMode::Original);
        assert_eq!(t.duration_seconds, 3723);
        assert_eq!(format_duration(3723), "1:02:03");
        assert_eq!(parse_duration("abc"), None);
        assert_eq!(parse_duration("42"), None);
    }

    #[test]
    fn test_overflowing_duration_falls_back_to_defaults() {
        assert_eq!(parse_duration("9999999999999999999:59"), None);
        let t = track_from(&rec(json!({ "duration": "9999999999999999999:59" })), ThumbnailMode::Original);
        assert_eq!(t.duration_seconds, 0);
        assert_eq!(t.duration_text, "9999999999999999999:59");
    }

    #[test]
    fn test_numeric_views_rendered_as_text() {
        let t = track_from(&rec(json!({ "views": 1234 })), ThumbnailMode::Original);
        assert_eq!(t.views, "1234");
    }

    #[test]
    fn test_album_tracks_inherit_album_fields() {
        let r = rec(json!({
            "title": "Album",
            "type": "EP",
            "year": 2020,
            "artists": [{ "name": "Band" }],
            "thumbnails": [{ "url": "https://img/cover" }],
            "tracks": [
                { "videoId": "t1", "title": "First", "album": null },
                { "videoId": "t2", "title": "Second", "artists": [{ "name": "Guest" }] }
            ]
        }));
        let album = album_from(&r, ThumbnailMode::Original);
        assert_eq!(album.kind, "EP");
        assert_eq!(album.year, "2020");
        assert_eq!(album.track_count, 2);
        assert_eq!(album.browse_id, "");
        assert_eq!(album.tracks[0].album, "Album");
        assert_eq!(album.tracks[0].artist, "Band");
        assert_eq!(album.tracks[0].thumbnail_url, "https://img/cover");
        assert_eq!(album.tracks[1].artist, "Guest");
    }

    #[test]
    fn test_album_from_empty_record() {
        let album = album_from(&rec(json!({})), ThumbnailMode::Original);
        assert_eq!(album.title, UNKNOWN_ALBUM);
        assert_eq!(album.kind, "Album");
        assert_eq!(album.track_count, 0);
        assert!(album.tracks.is_empty());
    }

    #[test]
    fn test_artist_summary_name_aliases() {
        let a = artist_summary_from(&rec(json!({ "artist": "Queen", "browseId": "UC9" })), ThumbnailMode::Original);
        assert_eq!(a.name, "Queen");
        assert_eq!(a.id, "UC9");
        let b = artist_summary_from(&rec(json!({})), ThumbnailMode::Original);
        assert_eq!(b.name, UNKNOWN_ARTIST);
    }

    #[test]
    fn test_artist_profile_shelves_are_capped() {
        let songs: Vec<Value> = (0..12).map(|i| json!({ "videoId": format!("s{i}") })).collect();
        let albums: Vec<Value> = (0..9).map(|i| json!({ "title": format!("a{i}"), "browseId": format!("b{i}") })).collect();
        let r = rec(json!({
            "name": "Artist",
            "subscribers": "1M",
            "thumbnails": [{ "url": "https://img/a", "width": 100, "height": 100 }],
            "songs": { "browseId": "VL", "results": songs },
            "albums": { "results": albums },
            "singles": [{ "title": "single" }]
        }));
        let limits = ProfileLimits { top_songs: 10, albums: 6, singles: 6 };
        let p = artist_profile_from(&r, limits, ThumbnailMode::Original);
        assert_eq!(p.name, "Artist");
        assert_eq!(p.followers_text, "1M");
        assert_eq!(p.top_songs.len(), 10);
        assert_eq!(p.albums.len(), 6);
        assert_eq!(p.albums[0].artist_name, "Artist");
        assert_eq!(p.singles.len(), 1);
        assert_eq!(p.thumbnails.len(), 1);
        assert_eq!(p.description, "");
    }
}
