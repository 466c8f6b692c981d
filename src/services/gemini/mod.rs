//! Gemini `generateContent` plumbing shared by both chat backends.

pub mod client;
pub mod relay;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::models::chat::{ChatRequest, ChatTurn, FinishReason, Part};

pub use client::GeminiClient;
pub use relay::GeminiRelay;

pub fn endpoint(base_url: &str, model: &str) -> String {
    format!("{}/models/{}:generateContent", base_url.trim_end_matches('/'), model)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest<'a> {
    pub contents: &'a [ChatTurn],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<ChatTurn>,
}

impl<'a> From<&'a ChatRequest> for GenerateContentRequest<'a> {
    fn from(request: &'a ChatRequest) -> Self {
        Self {
            contents: &request.contents,
            system_instruction: request.system_instruction().map(|text| ChatTurn {
                role: None,
                parts: vec![Part::text(text)],
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<ChatTurn>,
    pub finish_reason: Option<FinishReason>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

/// `{"error": {"code": 429, "message": "...", "status": "RESOURCE_EXHAUSTED"}}`
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub message: Option<String>,
    pub status: Option<String>,
}

impl ErrorEnvelope {
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }
}

/// Formats an upstream error as `"<code> <STATUS>. <body>"`.
pub fn error_detail(status: StatusCode, body: &str) -> String {
    let label = ErrorEnvelope::parse(body)
        .and_then(|envelope| envelope.error.status)
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_default();
    format!("{} {}. {}", status.as_u16(), label, body.trim())
}

pub fn is_rate_limited(status: StatusCode, detail: &str) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || detail.contains("RATE_LIMIT_EXCEEDED")
}
