use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Timestamps carried by every note.
///
/// They are flattened into the note record, so the persisted shape is simply
/// `createdAt` and `updatedAt` next to the other note fields.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NoteMetadata {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for NoteMetadata {
    fn default() -> Self {
        let now = Utc::now();
        NoteMetadata {
            created_at: now,
            updated_at: now,
        }
    }
}

impl NoteMetadata {
    pub(crate) fn on_update_note(&self) -> Self {
        NoteMetadata {
            created_at: self.created_at,
            updated_at: later_than(self.updated_at),
        }
    }
}

/// Current time, or one nanosecond after `prev` if the clock hasn't moved past it.
///
/// Keeps `updatedAt` and `savedAt` strictly increasing even when two writes land
/// within the resolution of the system clock.
pub(crate) fn later_than(prev: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > prev {
        now
    } else {
        prev + Duration::nanoseconds(1)
    }
}
