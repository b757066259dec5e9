#[macro_use]
extern crate tracing;
#[macro_use]
extern crate lazy_static;

pub mod configuration;
pub mod routes;
pub mod startup;
pub mod telemetry;

#[cfg(feature = "notetype_plain")]
pub type NoteType = auranotes::PlainNote;
#[cfg(not(feature = "notetype_plain"))]
pub type NoteType = auranotes::Document;

pub type NoteStore = auranotes::NoteStore<NoteType>;
