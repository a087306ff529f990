//! Web module - HTTP surface

mod app;
mod handlers;
mod pages;

pub use app::AppContext;

use actix_web::web;

/// Register every endpoint on an actix `App`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::index)
        .service(handlers::full_table)
        .service(handlers::api)
        .service(handlers::monthly_volume);
}
