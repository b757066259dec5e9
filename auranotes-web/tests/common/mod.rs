use auranotes::InMemoryBackend;
use auranotes_web::configuration::CONFIGURATION;
use auranotes_web::startup::run;
use auranotes_web::telemetry::{get_subscriber, init_tracing};
use auranotes_web::NoteStore;
use lazy_static::lazy_static;
use std::net::TcpListener;
use tracing_subscriber::fmt::TestWriter;

lazy_static! {
    static ref TRACING: () = {
        let subscriber = get_subscriber(&*CONFIGURATION, TestWriter::new());
        init_tracing(subscriber);
    };
}

pub struct TestApp {
    pub address: String,
}

/// Serve an empty in-memory store on a random port.
pub async fn spawn_app() -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);
    lazy_static::initialize(&TRACING);

    let store = NoteStore::open(Box::new(InMemoryBackend::new()))
        .await
        .expect("Failed to open note store");
    let server = run(listener, store, CONFIGURATION.debug).expect("Failed to bind address");
    let _ = tokio::spawn(server);
    TestApp { address }
}
