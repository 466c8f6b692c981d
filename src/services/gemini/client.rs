use async_trait::async_trait;
use log::{error, warn};
use reqwest::Client;

use super::{error_detail, is_rate_limited, GenerateContentRequest, GenerateContentResponse};
use crate::error::AppError;
use crate::models::chat::{ChatCandidate, ChatReply, ChatRequest, ChatResponse, ChatTurn, Role};
use crate::services::ChatBackend;

pub struct GeminiClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(client: Client, endpoint: String, api_key: String) -> Self {
        Self {
            client,
            endpoint,
            api_key,
        }
    }
}

#[async_trait]
impl ChatBackend for GeminiClient {
    async fn generate(&self, request: &ChatRequest) -> Result<ChatReply, AppError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&GenerateContentRequest::from(request))
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to send request: {}", e.without_url())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = error_detail(status, &body);
            warn!("Gemini API error: {}", detail);
            return Err(if is_rate_limited(status, &detail) {
                AppError::UpstreamRateLimited(detail)
            } else {
                AppError::Upstream(detail)
            });
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            error!("Failed to decode Gemini response: {:?}", e);
            AppError::Internal(format!("Failed to decode Gemini response: {}", e.without_url()))
        })?;

        let block_reason = parsed.prompt_feedback.and_then(|feedback| feedback.block_reason);
        let candidate = parsed.candidates.into_iter().next().ok_or_else(|| {
            AppError::Internal(match block_reason {
                Some(reason) => format!("Gemini returned no candidates (prompt blocked: {})", reason),
                None => "Gemini returned no candidates".to_string(),
            })
        })?;

        Ok(ChatReply::Shaped(ChatResponse {
            candidates: vec![ChatCandidate {
                // Safety stops may come back without any content.
                content: candidate
                    .content
                    .unwrap_or_else(|| ChatTurn::new(Role::Model, Vec::new())),
                finish_reason: candidate.finish_reason.unwrap_or_default(),
            }],
        }))
    }
}
