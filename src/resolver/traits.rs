// Strategy trait, fallback seam and resolver configuration

use async_trait::async_trait;
use uuid::Uuid;

use super::errors::ResolveError;
use super::models::{epoch_millis, DownloadFormat, Platform, VideoData};

pub const TIKWM_ENDPOINT: &str = "https://www.tikwm.com/api/";
pub const COBALT_ENDPOINT: &str = "https://co.wuk.sh/api/json";

const DEFAULT_TIMEOUT_SECONDS: u64 = 15;

/// Configuration for upstream resolution
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// TikTok extraction endpoint
    pub tikwm_endpoint: String,
    /// Generic multi-platform extraction endpoint
    pub cobalt_endpoint: String,
    /// Deadline for a single upstream call, in seconds
    pub timeout_seconds: u64,
    /// SOCKS5/HTTP proxy URL
    pub proxy: Option<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            tikwm_endpoint: TIKWM_ENDPOINT.to_string(),
            cobalt_endpoint: COBALT_ENDPOINT.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            proxy: None,
        }
    }
}

impl ResolverConfig {
    pub fn with_tikwm_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.tikwm_endpoint = endpoint.into();
        self
    }

    pub fn with_cobalt_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.cobalt_endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    pub fn with_proxy(mut self, proxy: Option<String>) -> Self {
        self.proxy = proxy;
        self
    }
}

/// One upstream extraction service, normalized behind a common contract
#[async_trait]
pub trait UpstreamStrategy: Send + Sync {
    /// Name of the strategy (for logging)
    fn name(&self) -> &'static str;

    /// Resolve a source URL into the canonical record
    async fn resolve(&self, url: &str, platform: Platform) -> Result<VideoData, ResolveError>;
}

/// Stand-in consulted when the generic strategy fails.
///
/// Injected explicitly; production wiring installs none. Returning `None`
/// lets the original error propagate.
pub trait FallbackProvider: Send + Sync {
    fn fallback(&self, url: &str, platform: Platform) -> Option<VideoData>;
}

/// Canned placeholder result for demos and tests. Format URLs are `"#"`
/// and must not be treated as fetchable.
pub struct StaticFallback;

impl FallbackProvider for StaticFallback {
    fn fallback(&self, url: &str, platform: Platform) -> Option<VideoData> {
        Some(VideoData {
            id: Uuid::new_v4().to_string(),
            platform,
            original_url: url.to_string(),
            title: "Demo Video Result (API Failed)".to_string(),
            description: Some(
                "Placeholder result returned because the extraction service could not be reached."
                    .to_string(),
            ),
            thumbnail: "https://picsum.photos/seed/mock/600/400".to_string(),
            formats: vec![
                DownloadFormat::video("MP4 (720p)", "#", "mp4"),
                DownloadFormat::audio("MP3 Audio", "#", "mp3"),
            ],
            timestamp: epoch_millis(),
            author: None,
        })
    }
}
