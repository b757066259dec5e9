//! Core types of Auranotes.
use crate::notemetadata::NoteMetadata;
use crate::notetype::NoteType;
use crate::path;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{self, Debug, Display};

/// Name of the implicit root folder that holds unfiled notes.
pub const GENERAL_FOLDER: &str = "General";

/// Title given to freshly created notes.
pub const DEFAULT_TITLE: &str = "Untitled";

/// ID of notes.
///
/// In a given note store ([`crate::notestore`]), [`NoteID`] uniquely identifies a note.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone, Hash)]
#[serde(into = "String", from = "String")]
pub struct NoteID {
    id: String,
}

impl From<NoteID> for String {
    fn from(id: NoteID) -> String {
        id.id
    }
}

impl From<String> for NoteID {
    fn from(id: String) -> NoteID {
        NoteID::new(id)
    }
}

impl From<&str> for NoteID {
    fn from(id: &str) -> NoteID {
        NoteID::new(id.to_owned())
    }
}

impl NoteID {
    pub fn new(id: String) -> Self {
        NoteID { id }
    }
}

impl Display for NoteID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl AsRef<str> for NoteID {
    fn as_ref(&self) -> &str {
        &self.id
    }
}

/// ID of a revision in the revision log.
#[derive(Debug, PartialEq, Eq, Clone, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct RevisionID {
    revision: String,
}

impl RevisionID {
    pub fn new(revision: String) -> Self {
        RevisionID { revision }
    }
}

impl Display for RevisionID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.revision)
    }
}

impl AsRef<str> for RevisionID {
    fn as_ref(&self) -> &str {
        &self.revision
    }
}

impl From<RevisionID> for String {
    fn from(revision: RevisionID) -> String {
        revision.revision
    }
}

impl From<String> for RevisionID {
    fn from(revision: String) -> RevisionID {
        RevisionID::new(revision)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
    #[default]
    None,
}

impl Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
            Priority::None => "none",
        };
        write!(f, "{}", s)
    }
}

/// A note as it is persisted and handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note<T> {
    pub id: NoteID,
    pub title: String,
    #[serde(default)]
    pub content: T,
    /// `None` means the note lives in [`GENERAL_FOLDER`].
    #[serde(default)]
    pub folder: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub reminder_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub metadata: NoteMetadata,
}

impl<T: NoteType> Note<T> {
    pub(crate) fn new(id: NoteID, folder: Option<String>) -> Self {
        Note {
            id,
            title: DEFAULT_TITLE.to_owned(),
            content: T::default(),
            folder: normalize_folder(folder),
            priority: Priority::None,
            color: None,
            reminder_at: None,
            metadata: NoteMetadata::default(),
        }
    }

    /// Folder path of the note, with unfiled notes reported as [`GENERAL_FOLDER`].
    pub fn folder_path(&self) -> &str {
        self.folder.as_deref().unwrap_or(GENERAL_FOLDER)
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.metadata.updated_at
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.metadata.created_at
    }

    /// Merge the fields present in `patch` and bump `updatedAt`.
    pub(crate) fn apply(&mut self, patch: NotePatch<T>) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(folder) = patch.folder {
            self.folder = normalize_folder(folder);
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(color) = patch.color {
            self.color = normalize_color(color);
        }
        if let Some(reminder_at) = patch.reminder_at {
            self.reminder_at = reminder_at;
        }
        self.metadata = self.metadata.on_update_note();
    }
}

/// A partial update of a note.
///
/// Fields left as `None` are not touched. Nullable fields use a nested option:
/// `Some(None)` clears the field, which is how `null` in a JSON patch is read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotePatch<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<T>,
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub folder: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub color: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub reminder_at: Option<Option<DateTime<Utc>>>,
}

impl<T> Default for NotePatch<T> {
    fn default() -> Self {
        NotePatch {
            title: None,
            content: None,
            folder: None,
            priority: None,
            color: None,
            reminder_at: None,
        }
    }
}

impl<T> NotePatch<T> {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: T) -> Self {
        self.content = Some(content);
        self
    }

    pub fn folder(mut self, folder: Option<String>) -> Self {
        self.folder = Some(folder);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn color(mut self, color: Option<String>) -> Self {
        self.color = Some(color);
        self
    }

    pub fn reminder_at(mut self, reminder_at: Option<DateTime<Utc>>) -> Self {
        self.reminder_at = Some(reminder_at);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.folder.is_none()
            && self.priority.is_none()
            && self.color.is_none()
            && self.reminder_at.is_none()
    }
}

fn deserialize_some<'de, D, V>(deserializer: D) -> Result<Option<V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Unfiled notes are stored as `None`, whether they were given no folder, an
/// empty path or the name of the General folder.
pub(crate) fn normalize_folder(folder: Option<String>) -> Option<String> {
    let folder = folder?;
    let joined = path::segments(&folder).join(path::DELIMITER);
    if joined.is_empty() || joined == GENERAL_FOLDER {
        None
    } else {
        Some(joined)
    }
}

pub(crate) fn normalize_color(color: Option<String>) -> Option<String> {
    let color = color?;
    let trimmed = color.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("default") {
        None
    } else {
        Some(trimmed.to_owned())
    }
}
