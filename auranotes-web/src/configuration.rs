use crate::NoteStore;
use auranotes::errors::NoteStoreError;
use auranotes::{BoxedBackend, InMemoryBackend, JsonFileBackend};

#[derive(serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteStoreType {
    InMemory,
    JsonFile,
}

#[derive(serde::Deserialize, Debug)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub debug: bool,
    notestoretype: NoteStoreType,
    datadir: String,
    populateinmemorystore: bool,
}

impl Settings {
    pub async fn get_note_store(&self) -> Result<NoteStore, NoteStoreError> {
        let backend: BoxedBackend = match self.notestoretype {
            NoteStoreType::InMemory => Box::new(InMemoryBackend::new()),
            NoteStoreType::JsonFile => Box::new(JsonFileBackend::new(&self.datadir)),
        };
        let store = NoteStore::open(backend).await?;
        if self.notestoretype == NoteStoreType::InMemory && self.populateinmemorystore {
            auranotes::notestore::util::populate_sample_data(&store).await?;
        }
        info!(store = ?self.notestoretype, "note store ready");
        Ok(store)
    }
}

lazy_static! {
    pub static ref CONFIGURATION: Settings =
        get_configuration().expect("Failed to read configuration.yml.");
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let config = config::Config::builder()
        .set_default("debug", false)?
        .set_default("host", "localhost")?
        .set_default("port", 8000)?
        .set_default("notestoretype", "InMemory")?
        .set_default("datadir", "data")?
        .set_default("populateinmemorystore", true)?
        .add_source(config::File::with_name("configuration").required(false))
        .add_source(
            config::Environment::default()
                .prefix("auranotes")
                .separator("_"),
        )
        .build()?;
    config.try_deserialize()
}
