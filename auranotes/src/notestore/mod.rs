//! The note store: authoritative notes, folders and revisions.
//!
//! A [`NoteStore`] keeps a cache of the three collections and writes through to
//! a [`Backend`]. Every mutation computes the new collection, writes it, and
//! only then commits it to the cache, so the cache never holds state the backend
//! rejected.
use crate::backend::{Backend, BoxedBackend, Collection};
use crate::errors::NoteStoreError;
use crate::foldertree::{build_folder_tree, FolderNode};
use crate::revision::{Revision, RevisionLog};
use crate::view::{self, ViewSelector};
use crate::{Note, NoteID, NotePatch, NoteType};
use chrono::{DateTime, Local, TimeZone};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;

mod inner;
mod remote;
pub mod util;

use inner::NoteStoreInner;
pub use inner::DEFAULT_FOLDERS;
pub use remote::RemoteChange;

pub struct NoteStore<T> {
    backend: BoxedBackend,
    cache: RwLock<NoteStoreInner<T>>,
}

async fn load<V: DeserializeOwned>(
    backend: &dyn Backend,
    collection: Collection,
) -> Result<Option<V>, NoteStoreError> {
    match backend.get(collection).await? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

impl<T: NoteType> NoteStore<T> {
    /// Load the store from `backend`.
    ///
    /// This is also where the one-time scan for due reminders happens.
    pub async fn open(backend: BoxedBackend) -> Result<Self, NoteStoreError> {
        let notes: Vec<Note<T>> = load(backend.as_ref(), Collection::Notes)
            .await?
            .unwrap_or_default();
        let folders: Option<Vec<String>> = load(backend.as_ref(), Collection::Folders).await?;
        let revisions: RevisionLog<T> = load(backend.as_ref(), Collection::Revisions)
            .await?
            .unwrap_or_default();

        let due = view::compute_due(&notes, &Local::now());
        if !due.is_empty() {
            info!(due = due.len(), "notes due today or overdue");
        }
        debug!(
            notes = notes.len(),
            revisions = revisions.len(),
            "note store loaded"
        );
        Ok(NoteStore {
            backend,
            cache: RwLock::new(NoteStoreInner::new(notes, folders, revisions)),
        })
    }

    async fn persist<V: Serialize>(
        &self,
        collection: Collection,
        value: &V,
    ) -> Result<(), NoteStoreError> {
        let value = serde_json::to_value(value)?;
        self.backend.set(collection, value).await
    }

    /// Write a new revision log, or leave the old one in place if the write fails.
    ///
    /// Revision bookkeeping never fails the operation that triggered it.
    async fn persist_revisions(&self, inner: &mut NoteStoreInner<T>, revisions: RevisionLog<T>) {
        match self.persist(Collection::Revisions, &revisions).await {
            Ok(()) => inner.revisions = revisions,
            Err(e) => warn!(error = %e, "failed to save revision log"),
        }
    }

    /// All notes, most recently updated first.
    pub async fn get_all_notes(&self) -> Vec<Note<T>> {
        let inner = self.cache.read().await;
        let mut notes = inner.notes.clone();
        view::sort_by_recency(&mut notes);
        notes
    }

    pub async fn get_note(&self, id: &NoteID) -> Result<Note<T>, NoteStoreError> {
        let inner = self.cache.read().await;
        inner.get_note(id).cloned()
    }

    /// Create an empty note in `folder`; `None` files it under General.
    pub async fn create_note(&self, folder: Option<String>) -> Result<Note<T>, NoteStoreError> {
        let mut inner = self.cache.write().await;
        let (notes, note) = inner.with_new_note(folder);
        self.persist(Collection::Notes, &notes).await?;
        inner.notes = notes;
        debug!(note_id = %note.id, folder = note.folder_path(), "note created");
        Ok(note)
    }

    /// Merge `patch` into a note.
    ///
    /// If the patch carries content, the new content is also recorded in the
    /// revision log.
    pub async fn update_note(
        &self,
        id: &NoteID,
        patch: NotePatch<T>,
    ) -> Result<Note<T>, NoteStoreError> {
        let mut inner = self.cache.write().await;
        let content = patch.content.clone();
        let (notes, note) = inner.with_updated_note(id, patch)?;
        self.persist(Collection::Notes, &notes).await?;
        inner.notes = notes;
        if let Some(c) = content {
            let revisions = inner.with_revision(id, c);
            self.persist_revisions(&mut inner, revisions).await;
        }
        debug!(note_id = %id, "note updated");
        Ok(note)
    }

    /// Delete a note and its revisions. Deleting a missing note is not an error.
    pub async fn delete_note(&self, id: &NoteID) -> Result<(), NoteStoreError> {
        let mut inner = self.cache.write().await;
        let notes = match inner.without_note(id) {
            Some(n) => n,
            None => return Ok(()),
        };
        self.persist(Collection::Notes, &notes).await?;
        inner.notes = notes;
        if let Some(revisions) = inner.without_revisions(id) {
            self.persist_revisions(&mut inner, revisions).await;
        }
        debug!(note_id = %id, "note deleted");
        Ok(())
    }

    /// Revisions of a note, newest first.
    pub async fn get_revisions(&self, id: &NoteID) -> Vec<Revision<T>> {
        let inner = self.cache.read().await;
        inner.revisions.for_note(id)
    }

    pub async fn get_folders(&self) -> Vec<String> {
        self.cache.read().await.folders.clone()
    }

    /// Create a top-level folder. Creating an existing folder changes nothing.
    pub async fn create_folder(&self, name: &str) -> Result<Vec<String>, NoteStoreError> {
        let mut inner = self.cache.write().await;
        if let Some(folders) = inner.with_folder(name)? {
            self.persist(Collection::Folders, &folders).await?;
            inner.folders = folders;
            debug!(folder = name, "folder created");
        }
        Ok(inner.folders.clone())
    }

    pub async fn create_subfolder(
        &self,
        parent: &str,
        name: &str,
    ) -> Result<Vec<String>, NoteStoreError> {
        let mut inner = self.cache.write().await;
        if let Some(folders) = inner.with_subfolder(parent, name)? {
            self.persist(Collection::Folders, &folders).await?;
            inner.folders = folders;
            debug!(parent, folder = name, "subfolder created");
        }
        Ok(inner.folders.clone())
    }

    /// Rename the last segment of folder `old` to `new_name`.
    ///
    /// Subfolders and the notes filed anywhere below `old` move along. Folders
    /// are written before notes and the two writes are not atomic: if the
    /// second one fails, the error is returned and the notes keep pointing at
    /// paths that are no longer in the folder list, which a re-read reveals.
    pub async fn rename_folder(
        &self,
        old: &str,
        new_name: &str,
    ) -> Result<Vec<String>, NoteStoreError> {
        let mut inner = self.cache.write().await;
        let (new_path, change) = inner.renamed_folder(old, new_name)?;
        if let Some(change) = change {
            self.persist(Collection::Folders, &change.folders).await?;
            inner.folders = change.folders;
            if let Some(notes) = change.notes {
                self.persist(Collection::Notes, &notes).await?;
                inner.notes = notes;
            }
            debug!(old, new = %new_path, "folder renamed");
        }
        Ok(inner.folders.clone())
    }

    /// Delete a folder and its subfolders. Notes filed there move to General.
    ///
    /// Same two-step write as [`NoteStore::rename_folder`].
    pub async fn delete_folder(&self, folder: &str) -> Result<Vec<String>, NoteStoreError> {
        let mut inner = self.cache.write().await;
        let change = inner.deleted_folder(folder)?;
        self.persist(Collection::Folders, &change.folders).await?;
        inner.folders = change.folders;
        if let Some(notes) = change.notes {
            self.persist(Collection::Notes, &notes).await?;
            inner.notes = notes;
        }
        debug!(folder, "folder deleted");
        Ok(inner.folders.clone())
    }

    pub async fn folder_tree(&self) -> Vec<FolderNode> {
        build_folder_tree(&self.cache.read().await.folders)
    }

    /// Folders exactly one level below `parent`.
    pub async fn subfolders(&self, parent: &str) -> Vec<String> {
        view::subfolders(&self.cache.read().await.folders, parent)
    }

    pub async fn view(&self, selector: &ViewSelector) -> Vec<Note<T>> {
        view::compute_view(&self.cache.read().await.notes, selector)
    }

    /// Notes due on the calendar day of `as_of`, in its time zone, or earlier.
    pub async fn due<Tz: TimeZone>(&self, as_of: &DateTime<Tz>) -> Vec<Note<T>> {
        view::compute_due(&self.cache.read().await.notes, as_of)
    }
}
