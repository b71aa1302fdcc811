use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// OpenAI-style body sent to the chat completions endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageGenerationRequest {
    pub inputs: String,
}

/// Chat reply exactly as the provider sent it.
#[derive(Debug, Clone)]
pub struct RawChatResponse {
    pub status: u16,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageBody {
    Bytes(Vec<u8>),
    Text(String),
}

/// Image reply exactly as the provider sent it. Successful replies are read
/// as bytes, failures as text.
#[derive(Debug, Clone)]
pub struct RawImageResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: ImageBody,
}

impl RawChatResponse {
    pub fn is_success(&self) -> bool {
        is_success(self.status)
    }
}

impl RawImageResponse {
    pub fn is_success(&self) -> bool {
        is_success(self.status)
    }

    pub fn content_was_image(&self) -> bool {
        matches!(self.body, ImageBody::Bytes(_))
    }

    pub fn byte_len(&self) -> usize {
        match &self.body {
            ImageBody::Bytes(bytes) => bytes.len(),
            ImageBody::Text(text) => text.len(),
        }
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}
