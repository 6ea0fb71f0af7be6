use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

use savr::{
    HttpTransport, Platform, ResolveError, Resolver, ResolverConfig, StaticFallback,
    TransportError,
};

/// Canned-response transport. A verb with no canned body reports a
/// connection failure, which doubles as the "service down" case.
struct StubTransport {
    get: Option<Value>,
    post: Option<Value>,
}

#[async_trait]
impl HttpTransport for StubTransport {
    async fn get_json(
        &self,
        _endpoint: &str,
        _query: &[(&str, &str)],
    ) -> Result<Value, TransportError> {
        self.get
            .clone()
            .ok_or_else(|| TransportError::Http("connection refused".to_string()))
    }

    async fn post_json(&self, _endpoint: &str, _body: &Value) -> Result<Value, TransportError> {
        self.post
            .clone()
            .ok_or_else(|| TransportError::Http("connection refused".to_string()))
    }
}

fn resolver_with(get: Option<Value>, post: Option<Value>) -> Resolver {
    Resolver::with_transport(ResolverConfig::default(), Arc::new(StubTransport { get, post }))
}

#[tokio::test]
async fn test_tiktok_resolution_end_to_end() {
    let resolver = resolver_with(
        Some(json!({
            "code": 0,
            "data": {
                "id": "7",
                "title": "",
                "cover": "c.jpg",
                "play": "p.mp4",
                "author": {"nickname": "bob"}
            }
        })),
        None,
    );

    let video = resolver
        .resolve("https://www.tiktok.com/@bob/video/7")
        .await
        .unwrap();

    assert_eq!(video.id, "7");
    assert_eq!(video.platform, Platform::TikTok);
    assert_eq!(video.title, "TikTok by bob");
    assert_eq!(video.thumbnail, "c.jpg");
    assert_eq!(video.author.as_deref(), Some("bob"));
    assert_eq!(video.formats.len(), 1);
    assert_eq!(video.formats[0].label, "No Watermark (MP4)");
    assert_eq!(video.formats[0].url, "p.mp4");
    assert_eq!(video.formats[0].extension(), "mp4");
    assert!(!video.formats[0].is_audio);
}

#[tokio::test]
async fn test_tiktok_error_code_surfaces_upstream_message() {
    let resolver = resolver_with(Some(json!({"code": 1, "msg": "bad link"})), None);

    let err = resolver
        .resolve("https://www.tiktok.com/@bob/video/7")
        .await
        .unwrap_err();
    assert_eq!(err, ResolveError::UpstreamRejected("bad link".to_string()));
}

#[tokio::test]
async fn test_tiktok_error_code_without_message_gets_generic_text() {
    let resolver = resolver_with(Some(json!({"code": 1})), None);

    let err = resolver
        .resolve("https://www.tiktok.com/@bob/video/7")
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ResolveError::UpstreamRejected("Failed to fetch TikTok video".to_string())
    );
}

#[tokio::test]
async fn test_generic_resolution_orders_url_before_audio() {
    let resolver = resolver_with(
        None,
        Some(json!({
            "url": "https://cdn/best.mp4",
            "audio": "https://cdn/track",
            "filename": "clip.mp4"
        })),
    );

    let video = resolver.resolve("https://youtu.be/abc").await.unwrap();

    assert_eq!(video.platform, Platform::YouTube);
    assert_eq!(video.title, "clip.mp4");
    assert_eq!(video.formats.len(), 2);
    assert_eq!(video.formats[0].label, "Best Quality");
    assert!(!video.formats[0].is_audio);
    assert_eq!(video.formats[1].label, "Audio Only");
    assert!(video.formats[1].is_audio);
}

#[tokio::test]
async fn test_unknown_platform_goes_through_the_generic_strategy() {
    let resolver = resolver_with(None, Some(json!({"url": "https://cdn/best.mp4"})));

    let video = resolver.resolve("https://example.com/v/1").await.unwrap();
    assert_eq!(video.platform, Platform::Unknown);
    assert_eq!(video.title, "Unknown Video");
    assert!(!video.id.is_empty());
}

#[tokio::test]
async fn test_generic_error_status_surfaces_upstream_text() {
    let resolver = resolver_with(
        None,
        Some(json!({"status": "error", "text": "rate limited"})),
    );

    let err = resolver.resolve("https://youtu.be/abc").await.unwrap_err();
    assert_eq!(err, ResolveError::UpstreamRejected("rate limited".to_string()));
}

#[tokio::test]
async fn test_transport_failures_collapse_to_strategy_messages() {
    let resolver = resolver_with(None, None);

    let err = resolver
        .resolve("https://www.tiktok.com/@bob/video/7")
        .await
        .unwrap_err();
    assert_eq!(err, ResolveError::TikTokFetchFailed);
    assert_eq!(
        err.to_string(),
        "Could not fetch TikTok data. Ensure the link is valid."
    );

    let err = resolver.resolve("https://youtu.be/abc").await.unwrap_err();
    assert_eq!(err, ResolveError::ServiceBusy);
    assert_eq!(
        err.to_string(),
        "Unable to process this URL. The service might be busy."
    );
}

#[tokio::test]
async fn test_timeout_is_a_resolution_error() {
    struct TimeoutTransport;

    #[async_trait]
    impl HttpTransport for TimeoutTransport {
        async fn get_json(
            &self,
            _endpoint: &str,
            _query: &[(&str, &str)],
        ) -> Result<Value, TransportError> {
            Err(TransportError::Timeout(15))
        }

        async fn post_json(&self, _endpoint: &str, _body: &Value) -> Result<Value, TransportError> {
            Err(TransportError::Timeout(15))
        }
    }

    let resolver = Resolver::with_transport(ResolverConfig::default(), Arc::new(TimeoutTransport));
    let err = resolver.resolve("https://youtu.be/abc").await.unwrap_err();
    assert_eq!(err, ResolveError::Timeout(15));
}

#[tokio::test]
async fn test_fallback_serves_generic_failures_only() {
    // Generic path: failure is replaced by the injected placeholder.
    let resolver = resolver_with(None, None).with_fallback(Box::new(StaticFallback));
    let video = resolver.resolve("https://youtu.be/abc").await.unwrap();
    assert_eq!(video.title, "Demo Video Result (API Failed)");
    assert_eq!(video.formats[0].url, "#");

    // TikTok path: the error propagates even with a fallback installed.
    let resolver = resolver_with(None, None).with_fallback(Box::new(StaticFallback));
    let err = resolver
        .resolve("https://www.tiktok.com/@bob/video/7")
        .await
        .unwrap_err();
    assert_eq!(err, ResolveError::TikTokFetchFailed);
}

#[tokio::test]
async fn test_invalid_input_never_reaches_the_wire() {
    struct PanicTransport;

    #[async_trait]
    impl HttpTransport for PanicTransport {
        async fn get_json(
            &self,
            _endpoint: &str,
            _query: &[(&str, &str)],
        ) -> Result<Value, TransportError> {
            panic!("unexpected network call");
        }

        async fn post_json(&self, _endpoint: &str, _body: &Value) -> Result<Value, TransportError> {
            panic!("unexpected network call");
        }
    }

    let resolver = Resolver::with_transport(ResolverConfig::default(), Arc::new(PanicTransport));
    let err = resolver.resolve("not a url").await.unwrap_err();
    assert_eq!(err, ResolveError::InvalidUrl("not a url".to_string()));
}
