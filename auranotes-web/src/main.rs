use auranotes_web::configuration::CONFIGURATION;
use auranotes_web::startup::run;
use auranotes_web::telemetry::{get_subscriber, init_tracing};
use std::io;
use std::net::TcpListener;

#[actix_web::main]
async fn main() -> io::Result<()> {
    let subscriber = get_subscriber(&*CONFIGURATION, io::stdout);
    init_tracing(subscriber);

    let store = CONFIGURATION
        .get_note_store()
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    let listener = TcpListener::bind((CONFIGURATION.host.as_str(), CONFIGURATION.port))?;
    tracing::info!(address = %listener.local_addr()?, "listening");
    run(listener, store, CONFIGURATION.debug)?.await
}
