use async_trait::async_trait;
use axora_proxy::{
    Error, Result,
    upstream::{ImageBody, RawChatResponse, RawImageResponse, UpstreamClient},
};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

/// Mock upstream client for testing. Replies are served in queue order and
/// every prompt is recorded.
#[derive(Debug, Default)]
pub struct MockUpstreamClient {
    pub chat_replies: Arc<Mutex<Vec<Result<RawChatResponse>>>>,
    pub image_replies: Arc<Mutex<Vec<Result<RawImageResponse>>>>,
    pub chat_prompts: Arc<Mutex<Vec<String>>>,
    pub image_prompts: Arc<Mutex<Vec<String>>>,
}

impl MockUpstreamClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chat_reply(self, reply: Result<RawChatResponse>) -> Self {
        self.chat_replies.lock().unwrap().push(reply);
        self
    }

    pub fn with_image_reply(self, reply: Result<RawImageResponse>) -> Self {
        self.image_replies.lock().unwrap().push(reply);
        self
    }

    pub fn get_chat_prompts(&self) -> Vec<String> {
        self.chat_prompts.lock().unwrap().clone()
    }

    pub fn get_image_prompts(&self) -> Vec<String> {
        self.image_prompts.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.get_chat_prompts().len() + self.get_image_prompts().len()
    }
}

#[async_trait]
impl UpstreamClient for MockUpstreamClient {
    async fn send_chat(&self, prompt: &str) -> Result<RawChatResponse> {
        self.chat_prompts.lock().unwrap().push(prompt.to_string());

        let mut replies = self.chat_replies.lock().unwrap();
        if replies.is_empty() {
            return Err(Error::internal("No more mock chat replies available"));
        }
        replies.remove(0)
    }

    async fn send_image(&self, prompt: &str) -> Result<RawImageResponse> {
        self.image_prompts.lock().unwrap().push(prompt.to_string());

        let mut replies = self.image_replies.lock().unwrap();
        if replies.is_empty() {
            return Err(Error::internal("No more mock image replies available"));
        }
        replies.remove(0)
    }
}

pub fn chat_completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "HuggingFaceTB/SmolLM3-3B",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

pub fn raw_chat(status: u16, body: impl Into<String>) -> Result<RawChatResponse> {
    Ok(RawChatResponse {
        status,
        body: body.into(),
    })
}

pub fn raw_png(bytes: &[u8]) -> Result<RawImageResponse> {
    Ok(RawImageResponse {
        status: 200,
        content_type: Some("image/png".to_string()),
        body: ImageBody::Bytes(bytes.to_vec()),
    })
}

pub fn raw_image_error(status: u16, text: &str) -> Result<RawImageResponse> {
    Ok(RawImageResponse {
        status,
        content_type: Some("text/plain".to_string()),
        body: ImageBody::Text(text.to_string()),
    })
}

pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
