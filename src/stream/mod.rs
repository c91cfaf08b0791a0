//! Media resolution: watch-page URL → short-lived direct audio URL.

mod ytdlp;

pub use ytdlp::YtDlpResolver;

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error("watch url cannot be empty")]
    InvalidUrl,

    #[error("{0}")]
    ExtractionFailed(String),

    #[error("no playable format found")]
    NoPlayableFormat,
}

#[async_trait]
pub trait StreamResolver: Send + Sync {
    /// Resolves the best audio-only stream, falling back to the best overall.
    /// The returned URL expires upstream and must not be cached.
    async fn resolve_audio_url(&self, watch_url: &str) -> Result<String, StreamError>;
}
