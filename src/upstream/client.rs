use super::types::*;
use crate::{Error, Result, config::UpstreamConfig};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::time::Duration;
use tracing::debug;

/// Outbound calls to the hosted inference provider. Implementations return
/// the provider's status and body untouched; a non-2xx status is not an error.
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    async fn send_chat(&self, prompt: &str) -> Result<RawChatResponse>;

    async fn send_image(&self, prompt: &str) -> Result<RawImageResponse>;
}

pub struct HuggingFaceClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    text_model: String,
    image_model: String,
    system_prompt: String,
    timeout_secs: u64,
}

impl HuggingFaceClient {
    pub fn new(config: UpstreamConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::config(format!("Failed to build upstream HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            text_model: config.text_model,
            image_model: config.image_model,
            system_prompt: config.system_prompt,
            timeout_secs: config.timeout_secs,
        })
    }

    pub fn chat_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    pub fn image_url(&self) -> String {
        format!("{}/hf-inference/models/{}", self.base_url, self.image_model)
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    pub fn build_chat_request(&self, prompt: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.text_model.clone(),
            messages: vec![
                ChatMessage::system(self.system_prompt.clone()),
                ChatMessage::user(prompt),
            ],
        }
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        Error::from_reqwest(err, self.timeout_secs)
    }
}

fn ensure_prompt(prompt: &str) -> Result<()> {
    if prompt.trim().is_empty() {
        return Err(Error::invalid_request("Prompt must be a non-empty string"));
    }
    Ok(())
}

#[async_trait]
impl UpstreamClient for HuggingFaceClient {
    async fn send_chat(&self, prompt: &str) -> Result<RawChatResponse> {
        ensure_prompt(prompt)?;

        let request = self.build_chat_request(prompt);
        debug!(url = %self.chat_url(), model = %request.model, "Sending chat completion");

        let response = self
            .client
            .post(self.chat_url())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        debug!(status, bytes = body.len(), "Received chat completion");

        Ok(RawChatResponse { status, body })
    }

    async fn send_image(&self, prompt: &str) -> Result<RawImageResponse> {
        ensure_prompt(prompt)?;

        debug!(url = %self.image_url(), "Sending image generation");

        let response = self
            .client
            .post(self.image_url())
            .bearer_auth(&self.api_key)
            .header(ACCEPT, "image/png")
            .json(&ImageGenerationRequest {
                inputs: prompt.to_string(),
            })
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        // Error replies are text; only a successful reply is treated as binary.
        let body = if status.is_success() {
            let bytes = response.bytes().await.map_err(|e| self.transport_error(e))?;
            ImageBody::Bytes(bytes.to_vec())
        } else {
            ImageBody::Text(response.text().await.map_err(|e| self.transport_error(e))?)
        };

        let raw = RawImageResponse {
            status: status.as_u16(),
            content_type,
            body,
        };
        debug!(status = raw.status, bytes = raw.byte_len(), "Received image generation");

        Ok(raw)
    }
}
