use actix_web::web;

use crate::error::AppError;
use crate::handlers::{self, leads, page};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default().error_handler(|err, _req| AppError::from(err).into()),
    )
    .route("/", web::get().to(page::index))
    .route("/save_lead", web::post().to(leads::save_lead))
    .route("/chat", web::post().to(handlers::chat_handler));
}
