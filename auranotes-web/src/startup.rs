use crate::routes::*;
use crate::NoteStore;
use actix_web::dev::Server;
use actix_web::middleware::{NormalizePath, TrailingSlash};
use actix_web::web::Data;
use actix_web::{web, App, HttpServer};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub fn run(
    listener: TcpListener,
    note_store: NoteStore,
    debug: bool,
) -> Result<Server, std::io::Error> {
    let ns: Data<NoteStore> = Data::new(note_store);
    if debug {
        debug!("serving in debug mode");
    }
    let server = HttpServer::new(move || {
        App::new()
            .wrap(NormalizePath::new(TrailingSlash::Trim))
            .wrap(TracingLogger::default())
            .service(web::scope("/api/v1").configure(api_v1_config))
            .configure(index_config)
            .app_data(ns.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}
