use actix_web::{HttpResponse, Responder, get, web};

use crate::handlers::appointments::list_appointments;
use crate::state::AppState;

#[get("")]
async fn appointments(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(list_appointments(&state).await)
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(appointments);
}
