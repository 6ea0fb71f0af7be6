// Common data models for the resolver

use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;

/// Social-media origin of a source URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    TikTok,
    YouTube,
    Twitter,
    Instagram,
    Facebook,
    Reddit,
    /// Unrecognized origin - a valid outcome, not an error
    Unknown,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TikTok => write!(f, "TikTok"),
            Self::YouTube => write!(f, "YouTube"),
            Self::Twitter => write!(f, "Twitter"),
            Self::Instagram => write!(f, "Instagram"),
            Self::Facebook => write!(f, "Facebook"),
            Self::Reddit => write!(f, "Reddit"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// One retrievable rendition of a resolved video.
///
/// `url` may be a placeholder (`"#"`) in degraded conditions; callers must
/// not assume it is fetchable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadFormat {
    /// Display label (e.g., "No Watermark (MP4)")
    pub label: String,
    /// Resource location
    pub url: String,
    /// File-extension hint; some upstream shapes omit it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ext: Option<String>,
    /// Governs audio-vs-video treatment and the default extension
    #[serde(default)]
    pub is_audio: bool,
}

impl DownloadFormat {
    pub fn video(label: impl Into<String>, url: impl Into<String>, ext: &str) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
            ext: Some(ext.to_string()),
            is_audio: false,
        }
    }

    pub fn audio(label: impl Into<String>, url: impl Into<String>, ext: &str) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
            ext: Some(ext.to_string()),
            is_audio: true,
        }
    }

    /// Extension for display/filename purposes. Audio formats without a
    /// stored hint default to "mp3", everything else to "mp4".
    pub fn extension(&self) -> &str {
        match &self.ext {
            Some(ext) => ext,
            None if self.is_audio => "mp3",
            None => "mp4",
        }
    }
}

/// Canonical resolved result and the library's stored unit.
///
/// Field names serialize in the persisted layout (`originalUrl`, `isAudio`),
/// so histories written by older clients load unchanged. `formats` may be
/// empty; the record is still well-formed and displayable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoData {
    /// Upstream id where one is provided, else a freshly generated token
    pub id: String,
    pub platform: Platform,
    pub original_url: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub thumbnail: String,
    /// Insertion order is display/priority order
    pub formats: Vec<DownloadFormat>,
    /// Creation instant, epoch milliseconds
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

/// Current instant as epoch milliseconds, the timestamp unit of the
/// persisted layout.
pub(crate) fn epoch_millis() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}
