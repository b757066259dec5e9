use thiserror::Error;

use crate::{NoteID, RevisionID};

#[derive(Error, Debug)]
pub enum NoteStoreError {
    #[error("note `{0}` doesn't exist")]
    NoteNotExist(NoteID),
    #[error("revision `{0}` doesn't exist")]
    RevisionNotExist(RevisionID),
    #[error("folder `{0}` doesn't exist")]
    FolderNotExist(String),
    #[error("invalid folder name: {0}")]
    InvalidFolderName(String),
    #[error("folder `{0}` already exists")]
    FolderExists(String),
    #[error("io error")]
    IOError(#[from] std::io::Error),
    #[error("serde error")]
    SerdeError(#[from] serde_json::Error),
    #[error("storage backend unavailable: {0}")]
    BackendUnavailable(String),
}

impl NoteStoreError {
    /// The operation referred to a note or folder that is not in the store.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            NoteStoreError::NoteNotExist(_)
                | NoteStoreError::RevisionNotExist(_)
                | NoteStoreError::FolderNotExist(_)
        )
    }

    /// The operation was rejected before touching any state.
    pub fn is_validation_failure(&self) -> bool {
        matches!(
            self,
            NoteStoreError::InvalidFolderName(_) | NoteStoreError::FolderExists(_)
        )
    }

    /// The backend failed to read or write.
    ///
    /// The store never retries on its own; retrying is up to the caller.
    pub fn is_persistence_failure(&self) -> bool {
        matches!(
            self,
            NoteStoreError::IOError(_)
                | NoteStoreError::SerdeError(_)
                | NoteStoreError::BackendUnavailable(_)
        )
    }
}
