pub mod leads;
pub mod page;

use std::any::Any;
use std::panic::AssertUnwindSafe;

use actix_web::{web, HttpResponse};
use futures::FutureExt;
use log::error;

use crate::error::AppError;
use crate::models::chat::ChatRequest;
use crate::state::AppState;

pub async fn chat_handler(
    request: web::Json<ChatRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    if request.contents.is_empty() {
        return Err(AppError::Validation("Missing chat contents.".to_string()));
    }

    let outcome = AssertUnwindSafe(state.chat.generate(&request))
        .catch_unwind()
        .await
        .unwrap_or_else(|panic| Err(AppError::Internal(panic_message(panic))));

    match outcome {
        Ok(reply) => Ok(HttpResponse::Ok().json(reply)),
        Err(service_err) => {
            error!("Chat request failed: {}", service_err);
            Err(service_err)
        }
    }
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "chat backend panicked".to_string()
    }
}
