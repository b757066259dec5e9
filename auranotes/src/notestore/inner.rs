//! State mirrored from the backend, and the pure transformations applied to it.
//!
//! None of the methods here mutate the cache. They compute the collection that
//! should be written, and [`super::NoteStore`] commits it once the backend has
//! accepted the write.
use crate::errors::NoteStoreError;
use crate::note::normalize_folder;
use crate::revision::RevisionLog;
use crate::{path, Note, NoteID, NotePatch, NoteType, GENERAL_FOLDER};
use std::collections::HashSet;
use uuid::Uuid;

/// Folders a store starts with when the backend has never stored any.
pub const DEFAULT_FOLDERS: [&str; 3] = ["Personal", "Work", "Ideas"];

#[derive(Debug)]
pub(super) struct NoteStoreInner<T> {
    pub(super) notes: Vec<Note<T>>,
    pub(super) folders: Vec<String>,
    pub(super) revisions: RevisionLog<T>,
}

/// The General folder holds unfiled notes and cannot be a real top-level folder.
fn check_not_general(folder: &str) -> Result<(), NoteStoreError> {
    if folder == GENERAL_FOLDER {
        Err(NoteStoreError::InvalidFolderName(format!(
            "`{}` is reserved for unfiled notes",
            folder
        )))
    } else {
        Ok(())
    }
}

/// Result of a folder operation touching both folders and notes.
pub(super) struct FolderChange<T> {
    pub(super) folders: Vec<String>,
    /// `None` when no note had to move.
    pub(super) notes: Option<Vec<Note<T>>>,
}

impl<T: NoteType> NoteStoreInner<T> {
    pub(super) fn new(
        notes: Vec<Note<T>>,
        folders: Option<Vec<String>>,
        revisions: RevisionLog<T>,
    ) -> Self {
        let folders = folders
            .unwrap_or_else(|| DEFAULT_FOLDERS.iter().map(|f| f.to_string()).collect());
        NoteStoreInner {
            notes,
            folders,
            revisions,
        }
    }

    /// Generate a new [`NoteID`].
    ///
    /// We use the UUID V4 scheme.
    fn get_new_noteid(&self) -> NoteID {
        NoteID::new(Uuid::new_v4().to_string())
    }

    pub(super) fn get_note(&self, id: &NoteID) -> Result<&Note<T>, NoteStoreError> {
        self.notes
            .iter()
            .find(|n| &n.id == id)
            .ok_or_else(|| NoteStoreError::NoteNotExist(id.clone()))
    }

    /// Explicit folders plus every ancestor they imply.
    fn known_folders(&self) -> HashSet<String> {
        let mut known = HashSet::new();
        for f in &self.folders {
            known.extend(path::ancestors(f));
            known.insert(f.clone());
        }
        known
    }

    fn has_folder(&self, folder: &str) -> bool {
        self.known_folders().contains(folder)
    }

    pub(super) fn with_new_note(&self, folder: Option<String>) -> (Vec<Note<T>>, Note<T>) {
        let note = Note::new(self.get_new_noteid(), folder);
        let mut notes = Vec::with_capacity(self.notes.len() + 1);
        notes.push(note.clone());
        notes.extend(self.notes.iter().cloned());
        (notes, note)
    }

    pub(super) fn with_updated_note(
        &self,
        id: &NoteID,
        patch: NotePatch<T>,
    ) -> Result<(Vec<Note<T>>, Note<T>), NoteStoreError> {
        let mut notes = self.notes.clone();
        let note = notes
            .iter_mut()
            .find(|n| &n.id == id)
            .ok_or_else(|| NoteStoreError::NoteNotExist(id.clone()))?;
        note.apply(patch);
        let updated = note.clone();
        Ok((notes, updated))
    }

    /// `None` if there is no such note.
    pub(super) fn without_note(&self, id: &NoteID) -> Option<Vec<Note<T>>> {
        if self.notes.iter().any(|n| &n.id == id) {
            Some(self.notes.iter().filter(|n| &n.id != id).cloned().collect())
        } else {
            None
        }
    }

    pub(super) fn with_revision(&self, id: &NoteID, content: T) -> RevisionLog<T> {
        let mut revisions = self.revisions.clone();
        revisions.record(id, content);
        revisions
    }

    pub(super) fn without_revisions(&self, id: &NoteID) -> Option<RevisionLog<T>> {
        let mut revisions = self.revisions.clone();
        if revisions.drop_note(id) > 0 {
            Some(revisions)
        } else {
            None
        }
    }

    /// `Ok(None)` if the folder is already there.
    pub(super) fn with_folder(&self, name: &str) -> Result<Option<Vec<String>>, NoteStoreError> {
        let name = path::validate_segment(name)?;
        check_not_general(&name)?;
        Ok(self.with_path(name))
    }

    pub(super) fn with_subfolder(
        &self,
        parent: &str,
        name: &str,
    ) -> Result<Option<Vec<String>>, NoteStoreError> {
        let name = path::validate_segment(name)?;
        let parent = path::segments(parent).join(path::DELIMITER);
        if !parent.is_empty() && !self.has_folder(&parent) {
            return Err(NoteStoreError::FolderNotExist(parent));
        }
        let folder = path::join(&parent, &name);
        check_not_general(&folder)?;
        Ok(self.with_path(folder))
    }

    fn with_path(&self, folder: String) -> Option<Vec<String>> {
        if self.folders.contains(&folder) {
            None
        } else {
            let mut folders = self.folders.clone();
            folders.push(folder);
            Some(folders)
        }
    }

    /// Rename the last segment of `old`, moving its whole subtree along.
    ///
    /// Descendant folders are rebased and notes filed anywhere in the subtree are
    /// repointed. Returns the new path with the change.
    pub(super) fn renamed_folder(
        &self,
        old: &str,
        new_name: &str,
    ) -> Result<(String, Option<FolderChange<T>>), NoteStoreError> {
        let new_name = path::validate_segment(new_name)?;
        let old = path::segments(old).join(path::DELIMITER);
        if old.is_empty() || !self.has_folder(&old) {
            return Err(NoteStoreError::FolderNotExist(old));
        }
        let new_path = match path::parent(&old) {
            Some(p) => path::join(&p, &new_name),
            None => new_name,
        };
        if new_path == old {
            return Ok((new_path, None));
        }
        check_not_general(&new_path)?;
        if self.has_folder(&new_path) {
            return Err(NoteStoreError::FolderExists(new_path));
        }

        let mut folders: Vec<String> = Vec::with_capacity(self.folders.len());
        for f in &self.folders {
            let moved = path::rebase(f, &old, &new_path).unwrap_or_else(|| f.clone());
            if !folders.contains(&moved) {
                folders.push(moved);
            }
        }
        // The renamed folder may only have existed implicitly
        if !folders.contains(&new_path) {
            folders.push(new_path.clone());
        }
        let notes = self.repointed_notes(|folder| path::rebase(folder, &old, &new_path));
        Ok((new_path, Some(FolderChange { folders, notes })))
    }

    /// Delete `target` and its subtree. Notes filed there move to General.
    pub(super) fn deleted_folder(&self, target: &str) -> Result<FolderChange<T>, NoteStoreError> {
        let target = path::segments(target).join(path::DELIMITER);
        if target.is_empty() || !self.has_folder(&target) {
            return Err(NoteStoreError::FolderNotExist(target));
        }
        let in_subtree = |f: &str| f == target || path::is_descendant_of(f, &target);
        let folders: Vec<String> = self
            .folders
            .iter()
            .filter(|f| !in_subtree(f.as_str()))
            .cloned()
            .collect();
        let notes = self.repointed_notes(|folder| {
            if in_subtree(folder) {
                Some(String::new())
            } else {
                None
            }
        });
        Ok(FolderChange { folders, notes })
    }

    /// Apply `op` to every filed note; notes for which it returns a new folder are
    /// moved and touched. `None` if nothing moved.
    fn repointed_notes<F>(&self, op: F) -> Option<Vec<Note<T>>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut changed = false;
        let notes = self
            .notes
            .iter()
            .map(|n| {
                let moved = n.folder.as_deref().and_then(&op);
                match moved {
                    Some(folder) => {
                        changed = true;
                        let mut note = n.clone();
                        note.apply(NotePatch::new().folder(normalize_folder(Some(folder))));
                        note
                    }
                    None => n.clone(),
                }
            })
            .collect();
        if changed {
            Some(notes)
        } else {
            None
        }
    }
}
