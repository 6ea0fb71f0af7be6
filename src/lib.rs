// savr - resolve social-media video links and keep a local library of results

pub mod library;
pub mod resolver;

pub use library::{JsonFileBackend, LibraryStore, MemoryBackend, StorageBackend};
pub use resolver::{
    detect_platform, is_valid_url, DownloadFormat, FallbackProvider, HttpTransport, Platform,
    ResolveError, Resolver, ResolverConfig, StaticFallback, TransportError, VideoData,
};
