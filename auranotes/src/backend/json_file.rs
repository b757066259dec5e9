//! Local storage as one JSON file per collection.
use super::{Backend, Collection};
use crate::errors::NoteStoreError;
use futures::future::BoxFuture;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

/// Stores each collection as `<key>.json` under a data directory.
///
/// Writes go to a temporary file that is then renamed over the old one, so a
/// crash never leaves a half-written collection behind.
#[derive(Debug)]
pub struct JsonFileBackend {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileBackend {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        JsonFileBackend {
            dir: dir.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_of(&self, collection: Collection) -> PathBuf {
        self.dir.join(format!("{}.json", collection.key()))
    }
}

impl Backend for JsonFileBackend {
    fn get(&self, collection: Collection) -> BoxFuture<Result<Option<Value>, NoteStoreError>> {
        Box::pin(async move {
            let contents = match fs::read_to_string(self.file_of(collection)).await {
                Ok(c) => c,
                Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
                Err(e) => return Err(NoteStoreError::IOError(e)),
            };
            Ok(Some(serde_json::from_str(&contents)?))
        })
    }

    fn set(&self, collection: Collection, value: Value) -> BoxFuture<Result<(), NoteStoreError>> {
        Box::pin(async move {
            let _guard = self.write_lock.lock().await;
            fs::create_dir_all(&self.dir).await?;
            let target = self.file_of(collection);
            let tmp = self.dir.join(format!("{}.json.tmp", collection.key()));
            fs::write(&tmp, serde_json::to_vec(&value)?).await?;
            fs::rename(&tmp, &target).await?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notestore::tests as common_tests;
    use crate::{NotePatch, NoteStore, PlainNote};
    use serde_json::json;
    use tempfile::{tempdir, TempDir};

    /// The directory is removed when the returned guard drops.
    async fn store() -> (TempDir, NoteStore<PlainNote>) {
        let dir = tempdir().unwrap();
        let store = NoteStore::open(Box::new(JsonFileBackend::new(dir.path())))
            .await
            .unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn store_survives_reopen() {
        let dir = tempdir().unwrap();
        let store: NoteStore<PlainNote> =
            NoteStore::open(Box::new(JsonFileBackend::new(dir.path())))
                .await
                .unwrap();
        let note = store.create_note(Some("Work".to_owned())).await.unwrap();
        let note = store
            .update_note(&note.id, NotePatch::new().content(PlainNote::from("kept")))
            .await
            .unwrap();
        store.create_folder("Travel").await.unwrap();
        drop(store);

        let reopened: NoteStore<PlainNote> =
            NoteStore::open(Box::new(JsonFileBackend::new(dir.path())))
                .await
                .unwrap();
        assert_eq!(reopened.get_note(&note.id).await.unwrap(), note);
        assert_eq!(reopened.get_revisions(&note.id).await.len(), 1);
        assert!(reopened.get_folders().await.contains(&"Travel".to_owned()));
    }

    #[tokio::test]
    async fn persists_across_instances() {
        let dir = tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path());
        assert!(backend.get(Collection::Notes).await.unwrap().is_none());
        backend
            .set(Collection::Notes, json!([{"id": "n1"}]))
            .await
            .unwrap();

        let reopened = JsonFileBackend::new(dir.path());
        assert_eq!(
            reopened.get(Collection::Notes).await.unwrap(),
            Some(json!([{"id": "n1"}]))
        );
        assert!(dir.path().join("auranotes_notes.json").exists());
        assert!(!dir.path().join("auranotes_notes.json.tmp").exists());
    }

    #[tokio::test]
    async fn creates_missing_data_dir() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("data").join("notes");
        let backend = JsonFileBackend::new(&nested);
        backend
            .set(Collection::Folders, json!(["Work"]))
            .await
            .unwrap();
        assert!(nested.join("auranotes_folders.json").exists());
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("auranotes_folders.json"), "not json").unwrap();
        let backend = JsonFileBackend::new(dir.path());
        let err = backend.get(Collection::Folders).await.unwrap_err();
        assert!(err.is_persistence_failure());
    }

    #[tokio::test]
    async fn create_note_defaults() {
        let (_dir, store) = store().await;
        common_tests::create_note_defaults(store).await;
    }

    #[tokio::test]
    async fn all_notes_by_recency() {
        let (_dir, store) = store().await;
        common_tests::all_notes_by_recency(store).await;
    }

    #[tokio::test]
    async fn update_merges_fields() {
        let (_dir, store) = store().await;
        common_tests::update_merges_fields(store).await;
    }

    #[tokio::test]
    async fn update_missing_note() {
        let (_dir, store) = store().await;
        common_tests::update_missing_note(store).await;
    }

    #[tokio::test]
    async fn content_updates_are_revisions() {
        let (_dir, store) = store().await;
        common_tests::content_updates_are_revisions(store).await;
    }

    #[tokio::test]
    async fn delete_note() {
        let (_dir, store) = store().await;
        common_tests::delete_note(store).await;
    }

    #[tokio::test]
    async fn folder_lifecycle() {
        let (_dir, store) = store().await;
        common_tests::folder_lifecycle(store).await;
    }

    #[tokio::test]
    async fn rename_folder_cascades() {
        let (_dir, store) = store().await;
        common_tests::rename_folder_cascades(store).await;
    }

    #[tokio::test]
    async fn delete_folder_moves_notes() {
        let (_dir, store) = store().await;
        common_tests::delete_folder_moves_notes(store).await;
    }

    #[tokio::test]
    async fn views() {
        let (_dir, store) = store().await;
        common_tests::views(store).await;
    }
}
