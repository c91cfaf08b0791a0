use crate::catalog::RawRecord;
use crate::model::Thumbnail;

/// How thumbnail URLs are emitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThumbnailMode {
    /// URL exactly as the provider sent it.
    Original,
    /// Size suffix stripped so clients pick the rendered size.
    Normalized,
}

impl ThumbnailMode {
    pub fn apply(self, url: String) -> String {
        match self {
            ThumbnailMode::Original => url,
            ThumbnailMode::Normalized => normalize_thumbnail(&url).to_string(),
        }
    }
}

/// URL of the last (largest) thumbnail, or empty.
pub fn best_thumbnail(thumbnails: &[RawRecord]) -> String {
    thumbnails
        .iter()
        .rev()
        .find_map(|t| t.str("url"))
        .unwrap_or_default()
        .to_string()
}

/// Strips a trailing size-encoding segment such as `=w120-h120-l90-rj` or `=s0`.
///
/// Only a final path segment qualifies: the `=` must come before any query
/// string and nothing after it may contain `/`, `?` or `&`. Cuts at the first
/// such `=`, so a second pass is a no-op.
pub fn normalize_thumbnail(url: &str) -> &str {
    let path_end = url.find('?').unwrap_or(url.len());
    let cut = url[..path_end].match_indices('=').map(|(i, _)| i).find(|&i| {
        let suffix = &url[i + 1..];
        let mut rest = suffix.chars();
        matches!(rest.next(), Some('w' | 's' | 'h'))
            && rest.next().is_some_and(|c| c.is_ascii_digit())
            && !suffix.contains(['/', '?', '&'])
    });
    match cut {
        Some(i) => &url[..i],
        None => url,
    }
}

/// Full descriptor list, skipping entries without a URL.
pub fn thumbnail_list(thumbnails: &[RawRecord]) -> Vec<Thumbnail> {
    thumbnails
        .iter()
        .filter_map(|t| {
            Some(Thumbnail {
                url: t.str("url")?.to_string(),
                width: t.u64("width").unwrap_or(0),
                height: t.u64("height").unwrap_or(0),
            })
        })
        .collect()
}
