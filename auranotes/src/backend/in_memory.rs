//! In-memory storage.
use super::{Backend, Collection};
use crate::errors::NoteStoreError;
use futures::future::BoxFuture;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory storage.
///
/// This is mostly designed for development use, because nothing survives the process.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    collections: RwLock<HashMap<Collection, Value>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Default::default()
    }
}

impl Backend for InMemoryBackend {
    fn get(&self, collection: Collection) -> BoxFuture<Result<Option<Value>, NoteStoreError>> {
        Box::pin(async move {
            let collections = self.collections.read().await;
            Ok(collections.get(&collection).cloned())
        })
    }

    fn set(&self, collection: Collection, value: Value) -> BoxFuture<Result<(), NoteStoreError>> {
        Box::pin(async move {
            let mut collections = self.collections.write().await;
            collections.insert(collection, value);
            Ok(())
        })
    }
}
