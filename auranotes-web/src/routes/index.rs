use actix_web::{get, web, HttpResponse};
use serde_json::json;

#[get("/health_check")]
#[instrument]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().finish()
}

/// Name and version of the running server.
#[get("/about")]
#[instrument]
async fn about() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check).service(about);
}
