use actix_web::{HttpResponse, Responder, get, post, web};
use serde::Deserialize;

use crate::error::AppError;
use crate::handlers::appointments::book_appointment;
use crate::handlers::doctors::{get_day_slots, list_doctors};
use crate::models::booking::BookingForm;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct SlotQuery {
    date: String,
}

#[get("")]
async fn doctors(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(list_doctors(&state).await)
}

#[get("/{doc_id}/slots")]
async fn slots(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<SlotQuery>,
) -> Result<HttpResponse, AppError> {
    let doc_id = path.into_inner();
    let day = get_day_slots(&state, &doc_id, &query.date).await?;
    Ok(HttpResponse::Ok().json(day))
}

#[post("/{doc_id}/appointments")]
async fn book(
    state: web::Data<AppState>,
    path: web::Path<String>,
    form: web::Json<BookingForm>,
) -> Result<HttpResponse, AppError> {
    let doc_id = path.into_inner();
    let confirmation = book_appointment(&state, &doc_id, form.into_inner()).await?;
    Ok(HttpResponse::Created().json(confirmation))
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(doctors).service(slots).service(book);
}
