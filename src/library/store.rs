// Library store - persisted history of resolved videos

use tracing::warn;

use super::backend::StorageBackend;
use crate::resolver::models::VideoData;

/// Fixed slot key for the whole serialized history.
pub const LIBRARY_KEY: &str = "savr_library_v1";

/// Ordered history of resolutions, most recent first. No two entries share
/// an id or a source URL; inserting a match replaces and promotes.
///
/// Storage failures degrade: loads fall back to an empty list, persist
/// failures keep the in-memory result. The caller never sees a storage
/// error.
pub struct LibraryStore {
    backend: Box<dyn StorageBackend>,
}

impl LibraryStore {
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Current history. Absent, unreadable, or malformed state yields an
    /// empty list.
    pub fn load(&self) -> Vec<VideoData> {
        let raw = match self.backend.read(LIBRARY_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!("[Library] load failed: {}", err);
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(videos) => videos,
            Err(err) => {
                warn!("[Library] discarding malformed history: {}", err);
                Vec::new()
            }
        }
    }

    /// Prepend a record. An existing entry matching on id or source URL is
    /// removed first; the new record wins.
    pub fn insert(&self, video: VideoData) -> Vec<VideoData> {
        let mut videos = self.load();

        if let Some(existing) = videos
            .iter()
            .position(|v| v.id == video.id || v.original_url == video.original_url)
        {
            videos.remove(existing);
        }
        videos.insert(0, video);

        self.persist(&videos);
        videos
    }

    /// Drop the entry with the given id, preserving the order of the rest.
    pub fn remove(&self, id: &str) -> Vec<VideoData> {
        let mut videos = self.load();
        videos.retain(|v| v.id != id);
        self.persist(&videos);
        videos
    }

    /// Delete the slot entirely.
    pub fn clear(&self) {
        if let Err(err) = self.backend.delete(LIBRARY_KEY) {
            warn!("[Library] clear failed: {}", err);
        }
    }

    fn persist(&self, videos: &[VideoData]) {
        let raw = match serde_json::to_string(videos) {
            Ok(raw) => raw,
            Err(err) => {
                warn!("[Library] serialize failed: {}", err);
                return;
            }
        };
        if let Err(err) = self.backend.write(LIBRARY_KEY, &raw) {
            warn!("[Library] persist failed: {}", err);
        }
    }
}
