//! Debounced saving of the note being edited.
//!
//! Title and content edits are held back until the user stops typing for a
//! while, then committed as one update. The two field groups are debounced
//! independently. Metadata (priority, reminder, color, folder) is committed
//! right away.
use crate::errors::NoteStoreError;
use crate::{Note, NoteID, NotePatch, NoteStore, NoteType, Priority, RevisionID};
use chrono::{DateTime, Utc};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};

/// Inactivity after which a debounced save fires.
pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldGroup {
    Title,
    Content,
}

impl FieldGroup {
    fn index(self) -> usize {
        match self {
            FieldGroup::Title => 0,
            FieldGroup::Content => 1,
        }
    }
}

#[derive(Debug, Default)]
struct Slot {
    generation: AtomicU64,
    commit: Mutex<()>,
}

/// Schedules at most one pending job per [`FieldGroup`].
///
/// Scheduling a job supersedes the unfired one of the same group. Jobs of a
/// group never run concurrently, and a job only runs if nothing was scheduled
/// after it, so an older value can never land after a newer one.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    slots: [Arc<Slot>; 2],
}

impl Default for Debouncer {
    fn default() -> Self {
        Debouncer::new(DEFAULT_DELAY)
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Debouncer {
            delay,
            slots: Default::default(),
        }
    }

    fn slot(&self, group: FieldGroup) -> &Arc<Slot> {
        &self.slots[group.index()]
    }

    /// Run `job` once `group` has been quiet for the debounce delay.
    pub fn schedule<F, Fut>(&self, group: FieldGroup, job: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let slot = self.slot(group).clone();
        let generation = slot.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _commit = slot.commit.lock().await;
            if slot.generation.load(Ordering::SeqCst) != generation {
                return;
            }
            job().await;
        });
    }

    /// Drop the unfired job of `group`, if any.
    pub fn cancel(&self, group: FieldGroup) {
        self.slot(group).generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Cancel the pending job of `group` and run `job` in its place now.
    pub async fn run_now<F, Fut, R>(&self, group: FieldGroup, job: F) -> R
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = R>,
    {
        let slot = self.slot(group);
        slot.generation.fetch_add(1, Ordering::SeqCst);
        let _commit = slot.commit.lock().await;
        job().await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    Idle,
    Pending,
    Saving,
    Saved,
    Error(String),
}

struct EditorState<T> {
    store: Arc<NoteStore<T>>,
    id: NoteID,
    title: Mutex<Option<String>>,
    content: Mutex<Option<T>>,
    status: watch::Sender<SaveStatus>,
}

impl<T: NoteType> EditorState<T> {
    async fn has_pending(&self) -> bool {
        let title = self.title.lock().await.is_some();
        title || self.content.lock().await.is_some()
    }

    async fn commit(&self, group: FieldGroup) -> Result<(), NoteStoreError> {
        let patch = match group {
            FieldGroup::Title => match self.title.lock().await.take() {
                Some(title) => NotePatch::new().title(title),
                None => return Ok(()),
            },
            FieldGroup::Content => match self.content.lock().await.take() {
                Some(content) => NotePatch::new().content(content),
                None => return Ok(()),
            },
        };
        let unsaved = patch.clone();
        self.status.send_replace(SaveStatus::Saving);
        match self.store.update_note(&self.id, patch).await {
            Ok(_) => {
                let next = if self.has_pending().await {
                    SaveStatus::Pending
                } else {
                    SaveStatus::Saved
                };
                self.status.send_replace(next);
                Ok(())
            }
            Err(e) => {
                warn!(note_id = %self.id, error = %e, "autosave failed");
                self.keep_unsaved(unsaved).await;
                self.status.send_replace(SaveStatus::Error(e.to_string()));
                Err(e)
            }
        }
    }

    /// Put a value that failed to save back, unless the user typed something
    /// newer in the meantime.
    async fn keep_unsaved(&self, patch: NotePatch<T>) {
        if let Some(title) = patch.title {
            self.title.lock().await.get_or_insert(title);
        }
        if let Some(content) = patch.content {
            self.content.lock().await.get_or_insert(content);
        }
    }

    async fn commit_now(&self, patch: NotePatch<T>) -> Result<Note<T>, NoteStoreError> {
        self.status.send_replace(SaveStatus::Saving);
        match self.store.update_note(&self.id, patch).await {
            Ok(note) => {
                self.status.send_replace(SaveStatus::Saved);
                Ok(note)
            }
            Err(e) => {
                warn!(note_id = %self.id, error = %e, "save failed");
                self.status.send_replace(SaveStatus::Error(e.to_string()));
                Err(e)
            }
        }
    }
}

/// Editing session of a single note.
pub struct NoteEditor<T> {
    state: Arc<EditorState<T>>,
    debouncer: Debouncer,
}

impl<T: NoteType> NoteEditor<T> {
    pub fn new(store: Arc<NoteStore<T>>, id: NoteID) -> Self {
        NoteEditor::with_delay(store, id, DEFAULT_DELAY)
    }

    pub fn with_delay(store: Arc<NoteStore<T>>, id: NoteID, delay: Duration) -> Self {
        let (status, _) = watch::channel(SaveStatus::Idle);
        NoteEditor {
            state: Arc::new(EditorState {
                store,
                id,
                title: Mutex::new(None),
                content: Mutex::new(None),
                status,
            }),
            debouncer: Debouncer::new(delay),
        }
    }

    pub fn note_id(&self) -> &NoteID {
        &self.state.id
    }

    pub fn status(&self) -> watch::Receiver<SaveStatus> {
        self.state.status.subscribe()
    }

    fn schedule(&self, group: FieldGroup) {
        self.state.status.send_replace(SaveStatus::Pending);
        let state = self.state.clone();
        self.debouncer.schedule(group, move || async move {
            // failures are reported through the status channel
            let _ = state.commit(group).await;
        });
    }

    pub async fn edit_title(&self, title: impl Into<String>) {
        *self.state.title.lock().await = Some(title.into());
        self.schedule(FieldGroup::Title);
    }

    pub async fn edit_content(&self, content: T) {
        *self.state.content.lock().await = Some(content);
        self.schedule(FieldGroup::Content);
    }

    /// Commit pending title and content edits without waiting for the delay.
    pub async fn flush(&self) -> Result<(), NoteStoreError> {
        let title = self
            .debouncer
            .run_now(FieldGroup::Title, || self.state.commit(FieldGroup::Title))
            .await;
        let content = self
            .debouncer
            .run_now(FieldGroup::Content, || self.state.commit(FieldGroup::Content))
            .await;
        title.and(content)
    }

    pub async fn set_priority(&self, priority: Priority) -> Result<Note<T>, NoteStoreError> {
        self.state
            .commit_now(NotePatch::new().priority(priority))
            .await
    }

    pub async fn set_reminder(
        &self,
        reminder_at: Option<DateTime<Utc>>,
    ) -> Result<Note<T>, NoteStoreError> {
        self.state
            .commit_now(NotePatch::new().reminder_at(reminder_at))
            .await
    }

    pub async fn set_color(&self, color: Option<String>) -> Result<Note<T>, NoteStoreError> {
        self.state.commit_now(NotePatch::new().color(color)).await
    }

    pub async fn move_to_folder(&self, folder: Option<String>) -> Result<Note<T>, NoteStoreError> {
        self.state.commit_now(NotePatch::new().folder(folder)).await
    }

    /// Replace the content with an earlier revision, dropping any unsaved
    /// content edit. The restored content becomes the newest revision.
    pub async fn restore_revision(&self, revision: &RevisionID) -> Result<Note<T>, NoteStoreError> {
        let found = self
            .state
            .store
            .get_revisions(&self.state.id)
            .await
            .into_iter()
            .find(|r| &r.id == revision)
            .ok_or_else(|| NoteStoreError::RevisionNotExist(revision.clone()))?;
        self.debouncer
            .run_now(FieldGroup::Content, || async move {
                self.state.content.lock().await.take();
                self.state
                    .commit_now(NotePatch::new().content(found.content))
                    .await
            })
            .await
    }
}
