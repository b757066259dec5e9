use crate::{NoteStore, NoteType};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use auranotes::errors::NoteStoreError;
use auranotes::{NoteID, NotePatch, ViewSelector};
use chrono::{DateTime, FixedOffset, Local};
use serde::Deserialize;

fn notestore_error_handler(e: &NoteStoreError) -> HttpResponse {
    match e {
        NoteStoreError::NoteNotExist(_) => HttpResponse::NotFound().body(e.to_string()),
        NoteStoreError::RevisionNotExist(_) => HttpResponse::NotFound().body(e.to_string()),
        NoteStoreError::FolderNotExist(_) => HttpResponse::NotFound().body(e.to_string()),
        NoteStoreError::InvalidFolderName(_) => HttpResponse::BadRequest().body(e.to_string()),
        NoteStoreError::FolderExists(_) => HttpResponse::Conflict().body(e.to_string()),
        NoteStoreError::IOError(_)
        | NoteStoreError::SerdeError(_)
        | NoteStoreError::BackendUnavailable(_) => {
            error!("Note store internal error {:?}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[derive(Deserialize, Debug)]
struct NoteListQuery {
    folder: Option<String>,
    search: Option<String>,
    #[serde(default)]
    recent: bool,
}

impl NoteListQuery {
    fn selector(self) -> ViewSelector {
        if let Some(query) = self.search {
            ViewSelector::Search { query }
        } else if let Some(path) = self.folder {
            ViewSelector::Folder { path }
        } else if self.recent {
            ViewSelector::Recent
        } else {
            ViewSelector::All
        }
    }
}

#[get("/note")]
#[instrument(skip(store))]
async fn list_notes(
    store: web::Data<NoteStore>,
    query: web::Query<NoteListQuery>,
) -> impl Responder {
    let notes = store.view(&query.into_inner().selector()).await;
    HttpResponse::Ok().json(notes)
}

#[derive(Deserialize, Debug, Default)]
struct NewNoteData {
    #[serde(default)]
    folder: Option<String>,
}

#[post("/note")]
#[instrument(skip(store, data))]
async fn new_note(
    store: web::Data<NoteStore>,
    data: Option<web::Json<NewNoteData>>,
) -> impl Responder {
    let folder = data.map(|d| d.into_inner()).unwrap_or_default().folder;
    match store.create_note(folder).await {
        Ok(note) => HttpResponse::Ok().json(note),
        Err(e) => notestore_error_handler(&e),
    }
}

#[get("/note/{note_id}")]
#[instrument(
    skip(store, params),
    fields(
        note_id = %params.0
    )
)]
async fn get_note(store: web::Data<NoteStore>, params: web::Path<(String,)>) -> impl Responder {
    let (note_id,) = params.into_inner();
    match store.get_note(&NoteID::from(note_id)).await {
        Ok(note) => HttpResponse::Ok().json(note),
        Err(e) => notestore_error_handler(&e),
    }
}

#[patch("/note/{note_id}")]
#[instrument(
    skip(store, params, patch),
    fields(
        note_id = %params.0
    )
)]
async fn update_note(
    store: web::Data<NoteStore>,
    params: web::Path<(String,)>,
    patch: web::Json<NotePatch<NoteType>>,
) -> impl Responder {
    let (note_id,) = params.into_inner();
    match store
        .update_note(&NoteID::from(note_id), patch.into_inner())
        .await
    {
        Ok(note) => HttpResponse::Ok().json(note),
        Err(e) => notestore_error_handler(&e),
    }
}

#[delete("/note/{note_id}")]
#[instrument(
    skip(store, params),
    fields(
        note_id = %params.0
    )
)]
async fn delete_note(store: web::Data<NoteStore>, params: web::Path<(String,)>) -> impl Responder {
    let (note_id,) = params.into_inner();
    match store.delete_note(&NoteID::from(note_id)).await {
        Ok(()) => HttpResponse::Ok().finish(),
        Err(e) => notestore_error_handler(&e),
    }
}

#[get("/note/{note_id}/revision")]
#[instrument(
    skip(store, params),
    fields(
        note_id = %params.0
    )
)]
async fn get_revisions(
    store: web::Data<NoteStore>,
    params: web::Path<(String,)>,
) -> impl Responder {
    let (note_id,) = params.into_inner();
    let id = NoteID::from(note_id);
    if let Err(e) = store.get_note(&id).await {
        return notestore_error_handler(&e);
    }
    HttpResponse::Ok().json(store.get_revisions(&id).await)
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct DueQuery {
    as_of: Option<DateTime<FixedOffset>>,
}

#[get("/due")]
#[instrument(skip(store))]
async fn due(store: web::Data<NoteStore>, query: web::Query<DueQuery>) -> impl Responder {
    // The offset of `asOf` decides what "today" is; without one, the server's zone
    let as_of: DateTime<FixedOffset> = match query.into_inner().as_of {
        Some(as_of) => as_of,
        None => Local::now().into(),
    };
    HttpResponse::Ok().json(store.due(&as_of).await)
}

#[get("/folder")]
#[instrument(skip(store))]
async fn get_folders(store: web::Data<NoteStore>) -> impl Responder {
    HttpResponse::Ok().json(store.get_folders().await)
}

#[get("/folder/tree")]
#[instrument(skip(store))]
async fn folder_tree(store: web::Data<NoteStore>) -> impl Responder {
    HttpResponse::Ok().json(store.folder_tree().await)
}

#[derive(Deserialize, Debug)]
struct FolderPathQuery {
    #[serde(default)]
    path: String,
}

#[get("/folder/children")]
#[instrument(skip(store))]
async fn folder_children(
    store: web::Data<NoteStore>,
    query: web::Query<FolderPathQuery>,
) -> impl Responder {
    HttpResponse::Ok().json(store.subfolders(&query.path).await)
}

#[derive(Deserialize, Debug)]
struct NewFolderData {
    name: String,
}

#[post("/folder")]
#[instrument(skip(store))]
async fn new_folder(
    store: web::Data<NoteStore>,
    data: web::Json<NewFolderData>,
) -> impl Responder {
    match store.create_folder(&data.name).await {
        Ok(folders) => HttpResponse::Ok().json(folders),
        Err(e) => notestore_error_handler(&e),
    }
}

#[derive(Deserialize, Debug)]
struct NewSubfolderData {
    parent: String,
    name: String,
}

#[post("/folder/subfolder")]
#[instrument(skip(store))]
async fn new_subfolder(
    store: web::Data<NoteStore>,
    data: web::Json<NewSubfolderData>,
) -> impl Responder {
    match store.create_subfolder(&data.parent, &data.name).await {
        Ok(folders) => HttpResponse::Ok().json(folders),
        Err(e) => notestore_error_handler(&e),
    }
}

#[derive(Deserialize, Debug)]
struct RenameFolderData {
    old: String,
    new: String,
}

#[post("/folder/rename")]
#[instrument(skip(store))]
async fn rename_folder(
    store: web::Data<NoteStore>,
    data: web::Json<RenameFolderData>,
) -> impl Responder {
    match store.rename_folder(&data.old, &data.new).await {
        Ok(folders) => HttpResponse::Ok().json(folders),
        Err(e) => notestore_error_handler(&e),
    }
}

#[delete("/folder")]
#[instrument(skip(store))]
async fn delete_folder(
    store: web::Data<NoteStore>,
    query: web::Query<FolderPathQuery>,
) -> impl Responder {
    match store.delete_folder(&query.path).await {
        Ok(folders) => HttpResponse::Ok().json(folders),
        Err(e) => notestore_error_handler(&e),
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(list_notes)
        .service(new_note)
        .service(get_note)
        .service(update_note)
        .service(delete_note)
        .service(get_revisions)
        .service(due)
        .service(get_folders)
        .service(folder_tree)
        .service(folder_children)
        .service(new_folder)
        .service(new_subfolder)
        .service(rename_folder)
        .service(delete_folder);
}
