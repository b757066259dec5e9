//! Per-note history of content snapshots.
use crate::notemetadata::later_than;
use crate::{NoteID, NoteType, RevisionID};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of revisions kept for each note.
pub const MAX_REVISIONS_PER_NOTE: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Revision<T> {
    pub id: RevisionID,
    pub note_id: NoteID,
    pub content: T,
    pub saved_at: DateTime<Utc>,
}

/// Append-only revision log shared by every note in a store.
///
/// Revisions are kept in insertion order. `savedAt` is strictly increasing per
/// note, so insertion order and `savedAt` order agree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevisionLog<T> {
    revisions: Vec<Revision<T>>,
}

impl<T> Default for RevisionLog<T> {
    fn default() -> Self {
        RevisionLog {
            revisions: Vec::new(),
        }
    }
}

impl<T: NoteType> RevisionLog<T> {
    pub fn new() -> Self {
        Default::default()
    }

    /// Append a snapshot of `content` and evict the oldest ones beyond the cap.
    pub fn record(&mut self, note_id: &NoteID, content: T) {
        let last_saved = self
            .revisions
            .iter()
            .filter(|r| &r.note_id == note_id)
            .map(|r| r.saved_at)
            .max();
        let saved_at = match last_saved {
            Some(prev) => later_than(prev),
            None => Utc::now(),
        };
        self.revisions.push(Revision {
            id: RevisionID::new(Uuid::new_v4().to_string()),
            note_id: note_id.clone(),
            content,
            saved_at,
        });
        self.evict(note_id);
    }

    fn evict(&mut self, note_id: &NoteID) {
        while self.count(note_id) > MAX_REVISIONS_PER_NOTE {
            let oldest = self
                .revisions
                .iter()
                .enumerate()
                .filter(|(_, r)| &r.note_id == note_id)
                .min_by_key(|(_, r)| r.saved_at)
                .map(|(i, _)| i);
            match oldest {
                Some(i) => {
                    self.revisions.remove(i);
                }
                None => break,
            }
        }
    }

    pub fn count(&self, note_id: &NoteID) -> usize {
        self.revisions
            .iter()
            .filter(|r| &r.note_id == note_id)
            .count()
    }

    /// Revisions of a note, newest first.
    pub fn for_note(&self, note_id: &NoteID) -> Vec<Revision<T>> {
        let mut v: Vec<Revision<T>> = self
            .revisions
            .iter()
            .filter(|r| &r.note_id == note_id)
            .cloned()
            .collect();
        v.sort_by_key(|r| std::cmp::Reverse(r.saved_at));
        v
    }

    /// Drop every revision of a note. Returns how many were removed.
    pub fn drop_note(&mut self, note_id: &NoteID) -> usize {
        let before = self.revisions.len();
        self.revisions.retain(|r| &r.note_id != note_id);
        before - self.revisions.len()
    }

    pub fn len(&self) -> usize {
        self.revisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revisions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlainNote;

    #[test]
    fn newest_first() {
        let mut log = RevisionLog::new();
        let id = NoteID::from("n1");
        log.record(&id, PlainNote::from("one"));
        log.record(&id, PlainNote::from("two"));
        let revs = log.for_note(&id);
        assert_eq!(revs.len(), 2);
        assert_eq!(revs[0].content, PlainNote::from("two"));
        assert_eq!(revs[1].content, PlainNote::from("one"));
        assert!(revs[0].saved_at > revs[1].saved_at);
    }

    #[test]
    fn cap_evicts_oldest() {
        let mut log = RevisionLog::new();
        let id = NoteID::from("n1");
        for i in 1..=25 {
            log.record(&id, PlainNote::new(format!("v{}", i)));
        }
        let revs = log.for_note(&id);
        assert_eq!(revs.len(), MAX_REVISIONS_PER_NOTE);
        let expected: Vec<PlainNote> = (6..=25)
            .rev()
            .map(|i| PlainNote::new(format!("v{}", i)))
            .collect();
        let got: Vec<PlainNote> = revs.into_iter().map(|r| r.content).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn cap_is_per_note() {
        let mut log = RevisionLog::new();
        let a = NoteID::from("a");
        let b = NoteID::from("b");
        for i in 0..MAX_REVISIONS_PER_NOTE {
            log.record(&a, PlainNote::new(format!("a{}", i)));
        }
        log.record(&b, PlainNote::from("b0"));
        assert_eq!(log.count(&a), MAX_REVISIONS_PER_NOTE);
        assert_eq!(log.count(&b), 1);
    }

    #[test]
    fn drop_note_revisions() {
        let mut log = RevisionLog::new();
        let a = NoteID::from("a");
        let b = NoteID::from("b");
        log.record(&a, PlainNote::from("a"));
        log.record(&a, PlainNote::from("a2"));
        log.record(&b, PlainNote::from("b"));
        assert_eq!(log.drop_note(&a), 2);
        assert!(log.for_note(&a).is_empty());
        assert_eq!(log.len(), 1);
    }
}
