//! Content types a note can carry.
//!
//! The store treats a note body as an opaque serializable value. The only thing it
//! ever asks of the body is its plain text, which feeds the search view.
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

mod document;
pub use document::Document;
mod plain;
pub use plain::PlainNote;

pub trait NoteType:
    Serialize + DeserializeOwned + Clone + Debug + PartialEq + Default + Send + Sync + 'static
{
    /// Text of every text-bearing leaf of the body, joined by single spaces.
    fn plain_text(&self) -> String;
}
