//! Storage backends of notes, folders and revisions.
//!
//! A backend is a durable key-value store holding three logical collections.
//! The [`crate::NoteStore`] serializes whole collections and hands them over as
//! JSON values, so a backend never needs to understand the records it keeps.
use crate::errors::NoteStoreError;
use futures::future::BoxFuture;
use serde_json::Value;
use std::fmt;

mod in_memory;
mod json_file;

pub use in_memory::InMemoryBackend;
pub use json_file::JsonFileBackend;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Notes,
    Folders,
    Revisions,
}

impl Collection {
    /// Storage key of the collection.
    pub fn key(&self) -> &'static str {
        match self {
            Collection::Notes => "auranotes_notes",
            Collection::Folders => "auranotes_folders",
            Collection::Revisions => "auranotes_revisions",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// An abstraction for storage backends.
///
/// Implementations must offer read-after-write consistency within a process:
/// once `set` resolves, `get` on the same collection returns the new value.
pub trait Backend: Send + Sync {
    /// Read a collection. `None` means the collection was never written.
    fn get(&self, collection: Collection) -> BoxFuture<Result<Option<Value>, NoteStoreError>>;
    /// Replace a collection.
    fn set(&self, collection: Collection, value: Value) -> BoxFuture<Result<(), NoteStoreError>>;
}

pub type BoxedBackend = Box<dyn Backend>;
