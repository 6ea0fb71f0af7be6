// TikTok strategy - tikwm.com extraction API
//
// Query-parameter GET; response envelope carries a status code and a data
// payload. Any non-zero code is a failure, surfacing the upstream's
// message text when present.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

use crate::resolver::errors::ResolveError;
use crate::resolver::models::{epoch_millis, DownloadFormat, Platform, VideoData};
use crate::resolver::traits::UpstreamStrategy;
use crate::resolver::transport::{HttpTransport, TransportError};

#[derive(Debug, Deserialize)]
struct TikwmEnvelope {
    code: i64,
    msg: Option<String>,
    data: Option<TikwmVideo>,
}

#[derive(Debug, Deserialize)]
struct TikwmVideo {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    cover: String,
    play: Option<String>,
    wmplay: Option<String>,
    music: Option<String>,
    author: Option<TikwmAuthor>,
}

#[derive(Debug, Deserialize)]
struct TikwmAuthor {
    nickname: Option<String>,
}

pub struct TikwmStrategy {
    endpoint: String,
    transport: Arc<dyn HttpTransport>,
}

impl TikwmStrategy {
    pub fn new(endpoint: impl Into<String>, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            endpoint: endpoint.into(),
            transport,
        }
    }
}

#[async_trait]
impl UpstreamStrategy for TikwmStrategy {
    fn name(&self) -> &'static str {
        "tikwm"
    }

    async fn resolve(&self, url: &str, _platform: Platform) -> Result<VideoData, ResolveError> {
        let raw = self
            .transport
            .get_json(&self.endpoint, &[("url", url)])
            .await
            .map_err(|e| match e {
                TransportError::Timeout(secs) => ResolveError::Timeout(secs),
                other => {
                    warn!("[tikwm] request failed: {}", other);
                    ResolveError::TikTokFetchFailed
                }
            })?;

        let envelope: TikwmEnvelope = serde_json::from_value(raw).map_err(|e| {
            warn!("[tikwm] unexpected response shape: {}", e);
            ResolveError::TikTokFetchFailed
        })?;

        if envelope.code != 0 {
            return Err(ResolveError::UpstreamRejected(
                envelope
                    .msg
                    .unwrap_or_else(|| "Failed to fetch TikTok video".to_string()),
            ));
        }

        let video = envelope.data.ok_or(ResolveError::TikTokFetchFailed)?;
        Ok(map_video(url, video))
    }
}

/// Normalize the tikwm payload into the canonical record.
fn map_video(url: &str, video: TikwmVideo) -> VideoData {
    let mut formats = Vec::new();
    if let Some(play) = non_empty(video.play) {
        formats.push(DownloadFormat::video("No Watermark (MP4)", play, "mp4"));
    }
    if let Some(wmplay) = non_empty(video.wmplay) {
        formats.push(DownloadFormat::video("Watermark (MP4)", wmplay, "mp4"));
    }
    if let Some(music) = non_empty(video.music) {
        formats.push(DownloadFormat::audio("Audio (MP3)", music, "mp3"));
    }

    let author = video.author.and_then(|a| a.nickname);
    let title = if video.title.is_empty() {
        format!("TikTok by {}", author.as_deref().unwrap_or("unknown"))
    } else {
        video.title
    };

    VideoData {
        id: video.id,
        platform: Platform::TikTok,
        original_url: url.to_string(),
        title: title.clone(),
        description: Some(title),
        thumbnail: video.cover,
        formats,
        timestamp: epoch_millis(),
        author,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_payload() -> TikwmVideo {
        TikwmVideo {
            id: "7".to_string(),
            title: "a clip".to_string(),
            cover: "https://cdn/c.jpg".to_string(),
            play: Some("https://cdn/p.mp4".to_string()),
            wmplay: Some("https://cdn/wm.mp4".to_string()),
            music: Some("https://cdn/m.mp3".to_string()),
            author: Some(TikwmAuthor {
                nickname: Some("bob".to_string()),
            }),
        }
    }

    #[test]
    fn test_maps_all_renditions_in_priority_order() {
        let video = map_video("https://www.tiktok.com/@bob/video/7", full_payload());

        let labels: Vec<&str> = video.formats.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["No Watermark (MP4)", "Watermark (MP4)", "Audio (MP3)"]
        );
        assert!(video.formats[2].is_audio);
        assert_eq!(video.title, "a clip");
        assert_eq!(video.description.as_deref(), Some("a clip"));
        assert_eq!(video.author.as_deref(), Some("bob"));
        assert_eq!(video.thumbnail, "https://cdn/c.jpg");
    }

    #[test]
    fn test_empty_title_falls_back_to_author() {
        let mut payload = full_payload();
        payload.title = String::new();

        let video = map_video("https://www.tiktok.com/@bob/video/7", payload);
        assert_eq!(video.title, "TikTok by bob");
    }

    #[test]
    fn test_missing_renditions_are_skipped() {
        let mut payload = full_payload();
        payload.wmplay = None;
        payload.music = Some(String::new());

        let video = map_video("https://www.tiktok.com/@bob/video/7", payload);
        assert_eq!(video.formats.len(), 1);
        assert_eq!(video.formats[0].url, "https://cdn/p.mp4");
    }

    #[test]
    fn test_envelope_decodes_error_shape() {
        // Error replies carry no data payload at all.
        let envelope: TikwmEnvelope =
            serde_json::from_str(r#"{"code": -1, "msg": "Url parsing is failed!"}"#).unwrap();
        assert_eq!(envelope.code, -1);
        assert_eq!(envelope.msg.as_deref(), Some("Url parsing is failed!"));
        assert!(envelope.data.is_none());
    }
}
