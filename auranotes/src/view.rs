//! Filtering and sorting of note lists.
//!
//! Everything here is a pure function over a snapshot of the notes; the store
//! never has to be locked while a view is computed.
use crate::path;
use crate::{Note, NoteType, Priority};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// Number of notes in the recent view.
pub const RECENT_LIMIT: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ViewSelector {
    All,
    Recent,
    Folder { path: String },
    Search { query: String },
}

/// Notes matching `selector`, ordered for list display.
///
/// High priority notes come first, then everything else by most recent update.
pub fn compute_view<T: NoteType>(notes: &[Note<T>], selector: &ViewSelector) -> Vec<Note<T>> {
    let selected: Vec<Note<T>> = match selector {
        ViewSelector::All => notes.to_vec(),
        ViewSelector::Recent => {
            let mut recent = notes.to_vec();
            sort_by_recency(&mut recent);
            recent.truncate(RECENT_LIMIT);
            recent
        }
        ViewSelector::Folder { path } => notes
            .iter()
            .filter(|n| n.folder_path() == path)
            .cloned()
            .collect(),
        ViewSelector::Search { query } => {
            let needle = query.trim().to_lowercase();
            notes
                .iter()
                .filter(|n| matches_search(n, &needle))
                .cloned()
                .collect()
        }
    };
    let mut selected = dedup_by_id(selected);
    sort_for_list(&mut selected);
    selected
}

fn dedup_by_id<T: NoteType>(notes: Vec<Note<T>>) -> Vec<Note<T>> {
    let mut seen = std::collections::HashSet::new();
    notes
        .into_iter()
        .filter(|n| seen.insert(n.id.clone()))
        .collect()
}

/// `needle` must already be lowercased. An empty needle matches every note.
fn matches_search<T: NoteType>(note: &Note<T>, needle: &str) -> bool {
    needle.is_empty()
        || note.title.to_lowercase().contains(needle)
        || note.content.plain_text().to_lowercase().contains(needle)
}

pub fn sort_by_recency<T>(notes: &mut [Note<T>]) {
    notes.sort_by_key(|n| Reverse(n.metadata.updated_at));
}

pub fn sort_for_list<T>(notes: &mut [Note<T>]) {
    notes.sort_by_key(|n| (n.priority != Priority::High, Reverse(n.metadata.updated_at)));
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DueState {
    Today,
    Overdue,
}

/// Whether a reminder counts as due at `as_of`.
///
/// "Today" is the calendar day of `as_of` in its own time zone, so callers pass
/// the user's local time.
pub fn due_state<Tz: TimeZone>(
    reminder_at: DateTime<Utc>,
    as_of: &DateTime<Tz>,
) -> Option<DueState> {
    let local_reminder = reminder_at.with_timezone(&as_of.timezone());
    if local_reminder.date_naive() == as_of.date_naive() {
        Some(DueState::Today)
    } else if reminder_at < as_of.with_timezone(&Utc) {
        Some(DueState::Overdue)
    } else {
        None
    }
}

/// Notes due today or overdue at `as_of`, most overdue first.
pub fn compute_due<T: NoteType, Tz: TimeZone>(
    notes: &[Note<T>],
    as_of: &DateTime<Tz>,
) -> Vec<Note<T>> {
    let mut due: Vec<Note<T>> = notes
        .iter()
        .filter(|n| matches!(n.reminder_at, Some(r) if due_state(r, as_of).is_some()))
        .cloned()
        .collect();
    due.sort_by_key(|n| n.reminder_at);
    due
}

/// Direct child folders of `parent` among `folders`.
pub fn subfolders<S: AsRef<str>>(folders: &[S], parent: &str) -> Vec<String> {
    let mut children: Vec<String> = folders
        .iter()
        .map(|f| f.as_ref())
        .filter(|f| path::is_direct_child_of(f, parent))
        .map(|f| f.to_owned())
        .collect();
    children.sort();
    children.dedup();
    children
}
