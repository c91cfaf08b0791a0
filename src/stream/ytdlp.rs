//! `yt-dlp` driven as a child process in metadata-only mode.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::process::Command;

use super::{StreamError, StreamResolver};

const FORMAT: &str = "bestaudio/best";

#[derive(Clone, Debug)]
pub struct YtDlpResolver {
    program: String,
    timeout: Duration,
}

impl YtDlpResolver {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    fn command(&self, watch_url: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args([
            "-f",
            FORMAT,
            "--no-playlist",
            "--skip-download",
            "--dump-single-json",
            "--quiet",
            "--no-warnings",
            "--",
        ])
        .arg(watch_url)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        // Dropping the request future (client gone, timeout) must stop the extractor.
        .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl StreamResolver for YtDlpResolver {
    async fn resolve_audio_url(&self, watch_url: &str) -> Result<String, StreamError> {
        let watch_url = watch_url.trim();
        if watch_url.is_empty() {
            return Err(StreamError::InvalidUrl);
        }

        let output = tokio::time::timeout(self.timeout, self.command(watch_url).output())
            .await
            .map_err(|_| {
                StreamError::ExtractionFailed(format!("extraction timed out after {:?}", self.timeout))
            })?
            .map_err(|e| StreamError::ExtractionFailed(format!("failed to run {}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                format!("{} exited with {}", self.program, output.status)
            } else {
                stderr
            };
            tracing::warn!(url = watch_url, %message, "audio extraction failed");
            return Err(StreamError::ExtractionFailed(message));
        }

        let info: Value = serde_json::from_slice(&output.stdout)
            .map_err(|e| StreamError::ExtractionFailed(format!("unreadable extractor output: {}", e)))?;

        audio_url_from_info(&info).ok_or(StreamError::NoPlayableFormat)
    }
}

/// Direct URL of the selected format. Merged selections have no top-level
/// `url`, so fall back to the requested format that carries audio.
fn audio_url_from_info(info: &Value) -> Option<String> {
    let non_empty = |v: &Value| v.get("url")?.as_str().filter(|u| !u.is_empty()).map(str::to_string);

    non_empty(info).or_else(|| {
        info.get("requested_formats")?
            .as_array()?
            .iter()
            .filter(|f| f.get("acodec").and_then(Value::as_str) != Some("none"))
            .find_map(non_empty)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_audio_url_top_level() {
        let info = json!({ "id": "x", "url": "https://rr1.googlevideo.com/audio" });
        assert_eq!(audio_url_from_info(&info).as_deref(), Some("https://rr1.googlevideo.com/audio"));
    }

    #[test]
    fn test_audio_url_from_requested_formats() {
        let info = json!({
            "requested_formats": [
                { "url": "https://video", "acodec": "none" },
                { "url": "https://audio", "acodec": "opus" }
            ]
        });
        assert_eq!(audio_url_from_info(&info).as_deref(), Some("https://audio"));
    }

    #[test]
    fn test_audio_url_missing() {
        assert_eq!(audio_url_from_info(&json!({ "url": "" })), None);
        assert_eq!(audio_url_from_info(&json!({ "title": "x" })), None);
        assert_eq!(audio_url_from_info(&json!(null)), None);
    }

    #[tokio::test]
    async fn test_empty_url_is_rejected_before_spawning() {
        let resolver = YtDlpResolver::new("definitely-not-a-real-binary", Duration::from_secs(1));
        let err = resolver.resolve_audio_url("  ").await.unwrap_err();
        assert!(matches!(err, StreamError::InvalidUrl));
    }

    #[tokio::test]
    async fn test_missing_program_is_extraction_failure() {
        let resolver = YtDlpResolver::new("definitely-not-a-real-binary", Duration::from_secs(5));
        let err = resolver.resolve_audio_url("https://bad").await.unwrap_err();
        assert!(matches!(err, StreamError::ExtractionFailed(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_is_extraction_failure() {
        let resolver = YtDlpResolver::new("false", Duration::from_secs(5));
        let err = resolver.resolve_audio_url("https://bad").await.unwrap_err();
        match err {
            StreamError::ExtractionFailed(msg) => assert!(msg.contains("exited with"), "{msg}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_slow_extractor_times_out() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("slow-extractor");
        std::fs::write(&script, "#!/bin/sh\nsleep 10\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let resolver = YtDlpResolver::new(script.to_string_lossy(), Duration::from_millis(200));
        let started = std::time::Instant::now();
        let err = resolver.resolve_audio_url("https://www.youtube.com/watch?v=x").await.unwrap_err();
        match err {
            StreamError::ExtractionFailed(msg) => assert!(msg.starts_with("extraction timed out"), "{msg}"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_json_output_is_extraction_failure() {
        let resolver = YtDlpResolver::new("echo", Duration::from_secs(5));
        let err = resolver.resolve_audio_url("https://www.youtube.com/watch?v=x").await.unwrap_err();
        assert!(matches!(err, StreamError::ExtractionFailed(_)));
    }
}
