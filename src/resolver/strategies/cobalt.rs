// Generic strategy - cobalt multi-platform extraction API
//
// JSON POST; the response carries a single `url`, a `picker` of
// alternatives, a separate `audio` track, or any combination. All present
// variants are appended, primary first, audio last.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

use crate::resolver::errors::ResolveError;
use crate::resolver::models::{epoch_millis, DownloadFormat, Platform, VideoData};
use crate::resolver::traits::UpstreamStrategy;
use crate::resolver::transport::{HttpTransport, TransportError};

/// Cobalt rarely returns a thumbnail, so records resolved through it carry
/// a fixed placeholder image.
const PLACEHOLDER_THUMBNAIL: &str = "https://picsum.photos/800/600";

const RESOLUTION_NOTE: &str = "Downloaded via Savr";

#[derive(Debug, Deserialize)]
struct CobaltResponse {
    status: Option<String>,
    text: Option<String>,
    url: Option<String>,
    picker: Option<Vec<CobaltPickerEntry>>,
    audio: Option<String>,
    filename: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CobaltPickerEntry {
    #[serde(rename = "type")]
    kind: Option<String>,
    url: String,
}

pub struct CobaltStrategy {
    endpoint: String,
    transport: Arc<dyn HttpTransport>,
}

impl CobaltStrategy {
    pub fn new(endpoint: impl Into<String>, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            endpoint: endpoint.into(),
            transport,
        }
    }
}

#[async_trait]
impl UpstreamStrategy for CobaltStrategy {
    fn name(&self) -> &'static str {
        "cobalt"
    }

    async fn resolve(&self, url: &str, platform: Platform) -> Result<VideoData, ResolveError> {
        let body = json!({
            "url": url,
            "filenamePattern": "basic",
        });

        let raw = self
            .transport
            .post_json(&self.endpoint, &body)
            .await
            .map_err(|e| match e {
                TransportError::Timeout(secs) => ResolveError::Timeout(secs),
                other => {
                    warn!("[cobalt] request failed: {}", other);
                    ResolveError::ServiceBusy
                }
            })?;

        let response: CobaltResponse = serde_json::from_value(raw).map_err(|e| {
            warn!("[cobalt] unexpected response shape: {}", e);
            ResolveError::ServiceBusy
        })?;

        if response.status.as_deref() == Some("error") {
            return Err(ResolveError::UpstreamRejected(
                response
                    .text
                    .unwrap_or_else(|| "Error fetching video".to_string()),
            ));
        }

        Ok(map_response(url, platform, response))
    }
}

/// Normalize the cobalt payload into the canonical record.
fn map_response(url: &str, platform: Platform, response: CobaltResponse) -> VideoData {
    let mut formats = Vec::new();

    if let Some(best) = response.url.filter(|u| !u.is_empty()) {
        formats.push(DownloadFormat::video("Best Quality", best, "mp4"));
    }

    if let Some(picker) = response.picker {
        for entry in picker {
            let label = format!("Type: {}", entry.kind.as_deref().unwrap_or("media"));
            formats.push(DownloadFormat::video(label, entry.url, "mp4"));
        }
    }

    // Audio always sorts last so the video renditions keep priority.
    if let Some(audio) = response.audio.filter(|u| !u.is_empty()) {
        formats.push(DownloadFormat::audio("Audio Only", audio, "mp3"));
    }

    let title = response
        .filename
        .filter(|f| !f.is_empty())
        .unwrap_or_else(|| format!("{} Video", platform));

    VideoData {
        id: Uuid::new_v4().to_string(),
        platform,
        original_url: url.to_string(),
        title,
        description: Some(RESOLUTION_NOTE.to_string()),
        thumbnail: PLACEHOLDER_THUMBNAIL.to_string(),
        formats,
        timestamp: epoch_millis(),
        author: None,
    }
}
