pub mod appointments;
pub mod doctors;
pub mod health;

use actix_web::web;

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/health").configure(health::init))
        .service(web::scope("/doctors").configure(doctors::init))
        .service(web::scope("/appointments").configure(appointments::init));
}
