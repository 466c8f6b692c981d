pub mod gemini;
pub mod lead_store;

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;

use crate::config::{ChatBackendKind, Config};
use crate::error::AppError;
use crate::models::chat::{ChatReply, ChatRequest};

pub use gemini::{GeminiClient, GeminiRelay};
pub use lead_store::{LeadStore, PgLeadStore};

/// Answers one chat request with a single upstream call. Callers guarantee
/// `request.contents` is non-empty.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn generate(&self, request: &ChatRequest) -> Result<ChatReply, AppError>;
}

pub fn build_chat_backend(config: &Config) -> Result<Arc<dyn ChatBackend>, reqwest::Error> {
    let client = Client::builder().timeout(config.gemini_timeout).build()?;
    let endpoint = gemini::endpoint(&config.gemini_base_url, &config.gemini_model);
    let api_key = config.gemini_api_key.clone();

    let backend: Arc<dyn ChatBackend> = match config.chat_backend {
        ChatBackendKind::Typed => Arc::new(GeminiClient::new(client, endpoint, api_key)),
        ChatBackendKind::Relay => Arc::new(GeminiRelay::new(client, endpoint, api_key)),
    };
    Ok(backend)
}
