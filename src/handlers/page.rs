use std::fs;
use std::io;
use std::path::Path;

use actix_web::http::header::ContentType;
use actix_web::{web, HttpResponse};

use crate::state::AppState;

pub const BUNDLED_INDEX: &str = include_str!("../../templates/index.html");

/// Reads the page once at startup; `None` serves the bundled widget.
pub fn load_index(path: Option<&Path>) -> io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => Ok(BUNDLED_INDEX.to_string()),
    }
}

pub async fn index(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(state.index_html.clone())
}
