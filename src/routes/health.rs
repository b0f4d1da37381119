use actix_web::{HttpResponse, Responder, get, web};
use serde_json::json;
use tracing::warn;

use crate::state::AppState;

#[get("/ping")]
async fn ping() -> impl Responder {
    HttpResponse::Ok().body("pong")
}

/// Whether the doctors API answers right now.
#[get("/upstream")]
async fn upstream(state: web::Data<AppState>) -> impl Responder {
    match state.api.fetch_doctors().await {
        Ok(doctors) => HttpResponse::Ok().json(json!({
            "upstream": "ok",
            "doctors": doctors.len()
        })),
        Err(e) => {
            warn!("Doctors API unreachable: {}", e);
            HttpResponse::ServiceUnavailable().json(json!({ "upstream": "unavailable" }))
        }
    }
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(ping).service(upstream);
}
