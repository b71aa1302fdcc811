//! Turns raw provider replies into the browser contract.

use super::types::{ImageBody, RawChatResponse, RawImageResponse};
use crate::server::{ChatReply, ImageReply};
use crate::{Error, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;

pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

pub fn normalize_chat(raw: RawChatResponse) -> Result<ChatReply> {
    let payload: Value = match serde_json::from_str(&raw.body) {
        Ok(payload) => payload,
        Err(_) => {
            return Err(Error::UpstreamNonJson {
                status: raw.status,
                body: raw.body,
            });
        }
    };

    if !raw.is_success() {
        return Err(Error::Upstream {
            status: raw.status,
            details: payload,
        });
    }

    Ok(ChatReply {
        generated_text: extract_reply_text(&payload),
    })
}

/// Content of the first choice, or the whole payload as JSON text when that
/// path is missing or null.
pub fn extract_reply_text(payload: &Value) -> String {
    match payload.pointer("/choices/0/message/content") {
        Some(Value::String(content)) => content.clone(),
        Some(Value::Null) | None => payload.to_string(),
        Some(other) => other.to_string(),
    }
}

pub fn normalize_image(raw: RawImageResponse) -> Result<ImageReply> {
    if !raw.is_success() {
        let text = match raw.body {
            ImageBody::Text(text) => text,
            ImageBody::Bytes(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        };
        return Err(Error::Upstream {
            status: raw.status,
            details: Value::String(text),
        });
    }

    let image = match &raw.body {
        ImageBody::Bytes(bytes) => png_data_url(bytes),
        ImageBody::Text(text) => png_data_url(text.as_bytes()),
    };

    Ok(ImageReply { image })
}

pub fn png_data_url(bytes: &[u8]) -> String {
    format!("{}{}", PNG_DATA_URL_PREFIX, STANDARD.encode(bytes))
}
