// Platform detection and URL validation

use url::Url;

use super::models::Platform;

/// Domain fragments checked in declaration order; first match wins.
const PLATFORM_FRAGMENTS: &[(Platform, &[&str])] = &[
    (Platform::TikTok, &["tiktok.com"]),
    (Platform::YouTube, &["youtube.com", "youtu.be"]),
    (Platform::Twitter, &["twitter.com", "x.com"]),
    (Platform::Instagram, &["instagram.com"]),
    (Platform::Facebook, &["facebook.com", "fb.watch"]),
    (Platform::Reddit, &["reddit.com"]),
];

/// Classify a raw URL string by substring match, case-insensitive.
/// Total: anything unrecognized is `Platform::Unknown`.
pub fn detect_platform(url: &str) -> Platform {
    if url.is_empty() {
        return Platform::Unknown;
    }

    let lower = url.to_lowercase();
    for (platform, fragments) in PLATFORM_FRAGMENTS {
        if fragments.iter().any(|fragment| lower.contains(fragment)) {
            return *platform;
        }
    }

    Platform::Unknown
}

/// Syntactic gate applied before any network call.
pub fn is_valid_url(url: &str) -> bool {
    Url::parse(url).is_ok()
}
