//! Raw catalog records → canonical schema.

mod fields;
mod thumbnail;

pub use fields::{album_from, artist_profile_from, artist_summary_from, track_from, ProfileLimits};
pub use thumbnail::ThumbnailMode;
