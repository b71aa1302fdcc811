use super::intent::{Action, classify};
use super::output::{ParsedOutput, parse_output};
use crate::{
    Error, Result,
    config::ClientConfig,
    server::{ChatRequest, IMAGE_ROUTE, ImageReply, ImageRequest, TEXT_ROUTE},
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_REPLY_TEXT: &str = "Task completed.";
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://via.placeholder.com/1024x1024/0f172a/06b6d4?text=Axora+Image+Simulation";

/// Result of a call through the proxy.
///
/// `Degraded` is only produced when the proxy could not be reached at all; it
/// carries a simulated value so the UI stays usable offline, and is never
/// confused with a genuine reply.
#[derive(Debug)]
pub enum Outcome<T> {
    Ok(T),
    Degraded(T),
    Err(Error),
}

impl<T> Outcome<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(_))
    }

    /// The reply or simulated value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Ok(value) | Self::Degraded(value) => Some(value),
            Self::Err(_) => None,
        }
    }

    pub fn error(&self) -> Option<&Error> {
        match self {
            Self::Err(e) => Some(e),
            _ => None,
        }
    }
}

/// A classified user turn: the badge and what came back.
#[derive(Debug)]
pub struct AgentTurn {
    pub action: Action,
    pub outcome: Outcome<ParsedOutput>,
}

pub fn simulation_message(action: Action) -> String {
    format!(
        "Simulation Mode (Backend Unreachable): I received your request to \"{}\". Since the backend is offline, I am simulating this response to show the UI.",
        action.label()
    )
}

/// Raw reply text out of a proxy text response. Accepts the proxy's own
/// `{ generated_text }` as well as bare text-generation and summarization
/// shapes, including their single-element array form.
pub fn extract_generated_text(result: &Value) -> String {
    let lookup = |item: Option<&Value>| -> String {
        let Some(item) = item else {
            return result.to_string();
        };
        ["generated_text", "summary_text"]
            .iter()
            .filter_map(|key| item.get(*key).and_then(Value::as_str))
            .find(|text| !text.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| result.to_string())
    };

    match result {
        Value::Array(items) => lookup(items.first()),
        Value::Object(_) => lookup(Some(result)),
        _ => DEFAULT_REPLY_TEXT.to_string(),
    }
}

/// HTTP client for the proxy's two routes.
pub struct ProxyClient {
    client: reqwest::Client,
    base_url: String,
    timeout_secs: u64,
}

impl ProxyClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::config(format!("Failed to build proxy HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.backend_url.trim_end_matches('/').to_string(),
            timeout_secs: config.timeout_secs,
        })
    }

    pub fn text_url(&self) -> String {
        format!("{}{}", self.base_url, TEXT_ROUTE)
    }

    pub fn image_url(&self) -> String {
        format!("{}{}", self.base_url, IMAGE_ROUTE)
    }

    /// Classifies `input` for display and sends it unchanged.
    pub async fn ask(&self, input: &str) -> AgentTurn {
        let action = classify(input);
        let outcome = self.request_text(input, action).await;
        AgentTurn { action, outcome }
    }

    /// `action` only shapes the offline simulation message.
    pub async fn request_text(&self, prompt: &str, action: Action) -> Outcome<ParsedOutput> {
        let body = ChatRequest {
            inputs: Some(prompt.to_string()),
            model: None,
        };

        match self.post::<_, Value>(&self.text_url(), &body).await {
            Ok(result) => Outcome::Ok(parse_output(&extract_generated_text(&result))),
            Err(e) if e.is_transport() => {
                warn!(url = %self.text_url(), "Proxy unreachable, simulating reply: {}", e);
                Outcome::Degraded(ParsedOutput {
                    visible: simulation_message(action),
                    reasoning: String::new(),
                })
            }
            Err(e) => Outcome::Err(e),
        }
    }

    pub async fn request_image(&self, prompt: &str) -> Outcome<ImageReply> {
        let body = ImageRequest {
            prompt: Some(prompt.to_string()),
        };

        match self.post::<_, ImageReply>(&self.image_url(), &body).await {
            Ok(reply) => Outcome::Ok(reply),
            Err(e) if e.is_transport() => {
                warn!(url = %self.image_url(), "Proxy unreachable, using placeholder image: {}", e);
                Outcome::Degraded(ImageReply {
                    image: PLACEHOLDER_IMAGE_URL.to_string(),
                })
            }
            Err(e) => Outcome::Err(e),
        }
    }

    async fn post<B, R>(&self, url: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        debug!(url, "Calling proxy");

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::from_reqwest(e, self.timeout_secs))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::from_reqwest(e, self.timeout_secs))?;

        if !status.is_success() {
            let details =
                serde_json::from_str(&text).unwrap_or_else(|_| Value::String(text.clone()));
            return Err(Error::Upstream {
                status: status.as_u16(),
                details,
            });
        }

        Ok(serde_json::from_str(&text)?)
    }
}
