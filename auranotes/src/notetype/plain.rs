use crate::NoteType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct PlainNote {
    body: String,
}

impl From<String> for PlainNote {
    fn from(body: String) -> PlainNote {
        PlainNote::new(body)
    }
}

impl From<&str> for PlainNote {
    fn from(body: &str) -> PlainNote {
        PlainNote::new(body.to_owned())
    }
}

impl From<PlainNote> for String {
    fn from(note: PlainNote) -> String {
        note.body
    }
}

impl PlainNote {
    pub fn new(body: String) -> Self {
        PlainNote { body }
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

impl NoteType for PlainNote {
    fn plain_text(&self) -> String {
        self.body.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}
