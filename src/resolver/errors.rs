// Error types for URL resolution

use std::fmt;

/// The only error kind that crosses the core boundary. Every variant
/// renders as a message fit for direct display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Input failed URL-syntax validation; nothing was sent upstream
    InvalidUrl(String),

    /// Upstream answered with an explicit error status and message text
    UpstreamRejected(String),

    /// TikTok extraction endpoint unreachable or returned garbage
    TikTokFetchFailed,

    /// Generic extraction endpoint unreachable or returned garbage
    ServiceBusy,

    /// Network call exceeded the configured deadline (seconds)
    Timeout(u64),
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUrl(url) => write!(f, "Invalid URL: {}", url),
            Self::UpstreamRejected(msg) => write!(f, "{}", msg),
            Self::TikTokFetchFailed => {
                write!(f, "Could not fetch TikTok data. Ensure the link is valid.")
            }
            Self::ServiceBusy => {
                write!(f, "Unable to process this URL. The service might be busy.")
            }
            Self::Timeout(secs) => write!(f, "The service did not respond within {}s.", secs),
        }
    }
}

impl std::error::Error for ResolveError {}
