use super::NoteStore;
use crate::errors::NoteStoreError;
use crate::{NotePatch, NoteType, Priority};
use chrono::{Duration, Utc};

/// Fill an empty store with a few notes and folders to play with.
pub async fn populate_sample_data<T>(store: &NoteStore<T>) -> Result<(), NoteStoreError>
where
    T: NoteType + for<'a> From<&'a str>,
{
    store.create_subfolder("Work", "Projects").await?;
    store.create_subfolder("Personal", "Travel").await?;

    let welcome = store.create_note(None).await?;
    store
        .update_note(
            &welcome.id,
            NotePatch::new()
                .title("Welcome")
                .content(T::from("Notes autosave while you type.\nUse folders to keep them tidy.")),
        )
        .await?;

    let roadmap = store.create_note(Some("Work/Projects".to_owned())).await?;
    store
        .update_note(
            &roadmap.id,
            NotePatch::new()
                .title("Roadmap")
                .content(T::from("Q3: ship sync\nQ4: mobile"))
                .priority(Priority::High)
                .color(Some("yellow".to_owned())),
        )
        .await?;

    let trip = store.create_note(Some("Personal/Travel".to_owned())).await?;
    store
        .update_note(
            &trip.id,
            NotePatch::new()
                .title("Packing list")
                .content(T::from("passport\ncharger"))
                .priority(Priority::Low)
                .reminder_at(Some(Utc::now() - Duration::hours(1))),
        )
        .await?;

    let idea = store.create_note(Some("Ideas".to_owned())).await?;
    store
        .update_note(
            &idea.id,
            NotePatch::new()
                .title("Half-baked")
                .content(T::from("A note app that writes itself")),
        )
        .await?;
    Ok(())
}
