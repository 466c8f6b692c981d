use async_trait::async_trait;
use log::{error, warn};
use reqwest::{Client, StatusCode};
use serde_json::Value;

use super::{error_detail, is_rate_limited, ErrorEnvelope, GenerateContentRequest};
use crate::error::AppError;
use crate::models::chat::{ChatReply, ChatRequest};
use crate::services::ChatBackend;

pub struct GeminiRelay {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GeminiRelay {
    pub fn new(client: Client, endpoint: String, api_key: String) -> Self {
        Self {
            client,
            endpoint,
            api_key,
        }
    }
}

fn unreachable_message(err: reqwest::Error) -> String {
    // Strip the URL; it carries the API key.
    format!("Failed to reach Gemini API: {}", err.without_url())
}

fn upstream_message(body: &str) -> Option<String> {
    ErrorEnvelope::parse(body)
        .and_then(|envelope| envelope.error.message)
        .filter(|message| !message.trim().is_empty())
}

#[async_trait]
impl ChatBackend for GeminiRelay {
    async fn generate(&self, request: &ChatRequest) -> Result<ChatReply, AppError> {
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&GenerateContentRequest::from(request))
            .send()
            .await
            .map_err(|e| {
                let message = unreachable_message(e);
                error!("{}", message);
                AppError::Unreachable(message)
            })?;

        let status = response.status();
        let status_err = response.error_for_status_ref().err();
        if let Some(status_err) = status_err {
            let generic = unreachable_message(status_err);
            let body = response.text().await.unwrap_or_default();

            if is_rate_limited(status, &body) {
                let detail = error_detail(status, &body);
                warn!("Gemini API rate limited: {}", detail);
                return Err(AppError::UpstreamRateLimited(detail));
            }

            let message = if status == StatusCode::BAD_REQUEST {
                upstream_message(&body).unwrap_or(generic)
            } else {
                generic
            };
            error!("Gemini API request failed ({}): {}", status, message);
            return Err(AppError::Unreachable(message));
        }

        let body: Value = response.json().await.map_err(|e| {
            error!("Gemini returned a non-JSON body: {:?}", e);
            AppError::Internal(format!("Gemini returned a non-JSON body: {}", e.without_url()))
        })?;
        Ok(ChatReply::Relayed(body))
    }
}
