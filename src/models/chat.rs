use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
    System,
}

/// One content part. Text parts carry `text`; anything else (inline data,
/// function calls, ...) stays in `payload` and is passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            payload: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl ChatTurn {
    pub fn new(role: Role, parts: Vec<Part>) -> Self {
        Self {
            role: Some(role),
            parts,
        }
    }
}

/// Body of `POST /chat`. The client keeps the history and sends it whole.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub contents: Vec<ChatTurn>,
    #[serde(default, rename = "systemInstruction")]
    pub system_instruction: Option<String>,
}

impl ChatRequest {
    /// The system instruction, if it says anything at all.
    pub fn system_instruction(&self) -> Option<&str> {
        self.system_instruction
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinishReason {
    Stop,
    MaxTokens,
    Safety,
    Recitation,
    Language,
    Other,
    Blocklist,
    ProhibitedContent,
    Spii,
    MalformedFunctionCall,
    ImageSafety,
    ImageProhibitedContent,
    ImageRecitation,
    ImageOther,
    NoImage,
    UnexpectedToolCall,
    TooManyToolCalls,
    #[default]
    #[serde(other)]
    FinishReasonUnspecified,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatCandidate {
    pub content: ChatTurn,
    pub finish_reason: FinishReason,
}

/// The minimal envelope handed back to the widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatResponse {
    pub candidates: Vec<ChatCandidate>,
}

/// What a chat backend produced: either the re-shaped envelope or the
/// provider's own body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChatReply {
    Shaped(ChatResponse),
    Relayed(Value),
}
