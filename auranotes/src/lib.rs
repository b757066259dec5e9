//! Auranotes: a personal notebook with folders, revisions and autosave.
#[macro_use]
extern crate tracing;

pub mod autosave;
pub mod backend;
pub mod errors;
pub mod foldertree;
pub mod note;
pub mod notemetadata;
pub mod notestore;
pub mod notetype;
pub mod path;
pub mod revision;
pub mod view;

pub use autosave::{NoteEditor, SaveStatus};
pub use backend::{Backend, BoxedBackend, Collection, InMemoryBackend, JsonFileBackend};
pub use foldertree::{build_folder_tree, FolderNode};
pub use note::{Note, NoteID, NotePatch, Priority, RevisionID, GENERAL_FOLDER};
pub use notestore::{NoteStore, RemoteChange};
pub use notetype::{Document, NoteType, PlainNote};
pub use revision::Revision;
pub use view::{compute_due, compute_view, ViewSelector};
