// Resolver - validates, detects, dispatches to an upstream strategy

use std::sync::Arc;
use tracing::{info, warn};

use super::detector::{detect_platform, is_valid_url};
use super::errors::ResolveError;
use super::models::{Platform, VideoData};
use super::strategies::{CobaltStrategy, TikwmStrategy};
use super::traits::{FallbackProvider, ResolverConfig, UpstreamStrategy};
use super::transport::{HttpTransport, ReqwestTransport};

/// Entry point of the core: turns a raw URL into a canonical record.
pub struct Resolver {
    tiktok: TikwmStrategy,
    generic: CobaltStrategy,
    fallback: Option<Box<dyn FallbackProvider>>,
}

impl Resolver {
    pub fn new(config: ResolverConfig) -> Self {
        let transport: Arc<dyn HttpTransport> = Arc::new(ReqwestTransport::new(&config));
        Self::with_transport(config, transport)
    }

    /// Build against an injected transport (test seam).
    pub fn with_transport(config: ResolverConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            tiktok: TikwmStrategy::new(config.tikwm_endpoint, Arc::clone(&transport)),
            generic: CobaltStrategy::new(config.cobalt_endpoint, transport),
            fallback: None,
        }
    }

    /// Install a fallback consulted when the generic strategy fails.
    pub fn with_fallback(mut self, fallback: Box<dyn FallbackProvider>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    fn strategy_for(&self, platform: Platform) -> &dyn UpstreamStrategy {
        match platform {
            Platform::TikTok => &self.tiktok,
            _ => &self.generic,
        }
    }

    pub async fn resolve(&self, url: &str) -> Result<VideoData, ResolveError> {
        if !is_valid_url(url) {
            return Err(ResolveError::InvalidUrl(url.to_string()));
        }

        let platform = detect_platform(url);
        let strategy = self.strategy_for(platform);
        info!("[Resolver] {} -> {} strategy", platform, strategy.name());

        match strategy.resolve(url, platform).await {
            Ok(video) => {
                info!(
                    "[Resolver] resolved \"{}\" ({} formats)",
                    video.title,
                    video.formats.len()
                );
                Ok(video)
            }
            Err(err) => {
                warn!("[Resolver] {} strategy failed: {}", strategy.name(), err);
                if platform != Platform::TikTok {
                    if let Some(fallback) = &self.fallback {
                        if let Some(video) = fallback.fallback(url, platform) {
                            warn!("[Resolver] serving injected fallback result");
                            return Ok(video);
                        }
                    }
                }
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::Value;

    use crate::resolver::transport::TransportError;

    /// Transport that refuses everything; resolution must fail before or
    /// after it depending on the input.
    struct DeadTransport;

    #[async_trait]
    impl HttpTransport for DeadTransport {
        async fn get_json(
            &self,
            _endpoint: &str,
            _query: &[(&str, &str)],
        ) -> Result<Value, TransportError> {
            Err(TransportError::Http("connection refused".to_string()))
        }

        async fn post_json(&self, _endpoint: &str, _body: &Value) -> Result<Value, TransportError> {
            Err(TransportError::Http("connection refused".to_string()))
        }
    }

    fn dead_resolver() -> Resolver {
        Resolver::with_transport(ResolverConfig::default(), Arc::new(DeadTransport))
    }

    #[test]
    fn test_strategy_selection_is_pure_on_platform() {
        let resolver = dead_resolver();
        assert_eq!(resolver.strategy_for(Platform::TikTok).name(), "tikwm");
        assert_eq!(resolver.strategy_for(Platform::YouTube).name(), "cobalt");
        assert_eq!(resolver.strategy_for(Platform::Unknown).name(), "cobalt");
    }

    #[tokio::test]
    async fn test_invalid_url_is_rejected_before_any_call() {
        let err = dead_resolver().resolve("not a url").await.unwrap_err();
        assert_eq!(err, ResolveError::InvalidUrl("not a url".to_string()));
    }

    #[tokio::test]
    async fn test_strategy_failures_map_to_their_message() {
        let resolver = dead_resolver();

        let err = resolver
            .resolve("https://www.tiktok.com/@u/video/7")
            .await
            .unwrap_err();
        assert_eq!(err, ResolveError::TikTokFetchFailed);

        let err = resolver.resolve("https://youtu.be/abc").await.unwrap_err();
        assert_eq!(err, ResolveError::ServiceBusy);
    }
}
