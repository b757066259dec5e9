//! Changes pushed by a remote synchronised store.
//!
//! When the backend is a remote service that notifies about changes instead of
//! being polled, those notifications are fed into [`NoteStore::apply_remote`].
//! The remote already holds the data, so notes and folders are only brought
//! into the cache; content changes still go through the revision log.
use super::NoteStore;
use crate::{Note, NoteID, NoteType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "data",
    rename_all = "camelCase",
    bound(deserialize = "T: serde::de::DeserializeOwned + Default")
)]
pub enum RemoteChange<T> {
    NoteUpserted(Note<T>),
    NoteRemoved(NoteID),
    FolderAdded(String),
    FolderRemoved(String),
    NotesSnapshot(Vec<Note<T>>),
    FoldersSnapshot(Vec<String>),
}

impl<T: NoteType> NoteStore<T> {
    pub async fn apply_remote(&self, change: RemoteChange<T>) {
        let mut inner = self.cache.write().await;
        let mut revisions = inner.revisions.clone();
        let mut revisions_changed = false;
        match change {
            RemoteChange::NoteUpserted(note) => {
                match inner.notes.iter().position(|n| n.id == note.id) {
                    Some(i) => {
                        if inner.notes[i].content != note.content {
                            revisions.record(&note.id, note.content.clone());
                            revisions_changed = true;
                        }
                        inner.notes[i] = note;
                    }
                    None => inner.notes.insert(0, note),
                }
            }
            RemoteChange::NoteRemoved(id) => {
                inner.notes.retain(|n| n.id != id);
                revisions_changed = revisions.drop_note(&id) > 0;
            }
            RemoteChange::FolderAdded(folder) => {
                if !inner.folders.contains(&folder) {
                    inner.folders.push(folder);
                }
            }
            RemoteChange::FolderRemoved(folder) => {
                inner.folders.retain(|f| f != &folder);
            }
            RemoteChange::NotesSnapshot(notes) => {
                for note in &notes {
                    let changed = inner
                        .notes
                        .iter()
                        .find(|n| n.id == note.id)
                        .map_or(false, |old| old.content != note.content);
                    if changed {
                        revisions.record(&note.id, note.content.clone());
                        revisions_changed = true;
                    }
                }
                inner.notes = notes;
            }
            RemoteChange::FoldersSnapshot(folders) => {
                inner.folders = folders;
            }
        }
        if revisions_changed {
            self.persist_revisions(&mut inner, revisions).await;
        }
    }
}
