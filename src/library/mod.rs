// Library module - persisted history over a scoped key-value backend

pub mod backend;
pub mod store;

pub use backend::{JsonFileBackend, MemoryBackend, StorageBackend, StorageError};
pub use store::{LibraryStore, LIBRARY_KEY};
