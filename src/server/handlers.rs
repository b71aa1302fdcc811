use super::types::{ChatReply, ChatRequest, ImageReply, ImageRequest, ProxyError};
use crate::{
    Error,
    upstream::{UpstreamClient, normalize_chat, normalize_image},
};
use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

const TEXT_PROMPT_PREVIEW: usize = 100;
const IMAGE_PROMPT_PREVIEW: usize = 80;
const REPLY_PREVIEW: usize = 120;

#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<dyn UpstreamClient>,
}

pub type HandlerError = (StatusCode, Json<ProxyError>);

pub async fn text_completion(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, HandlerError> {
    let request_id = Uuid::new_v4();
    let request = accept_body(payload, request_id)?;
    let prompt = require_string(request.inputs.as_deref(), "inputs", request_id)?;

    if let Some(model) = request.model.as_deref() {
        debug!(%request_id, model, "Ignoring client-supplied model");
    }

    info!(
        %request_id,
        prompt = %preview(prompt, TEXT_PROMPT_PREVIEW),
        "Forwarding text request"
    );

    let result = match state.upstream.send_chat(prompt).await {
        Ok(raw) => {
            info!(%request_id, status = raw.status, bytes = raw.body.len(), "Upstream text response");
            normalize_chat(raw)
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(reply) => {
            info!(
                %request_id,
                reply = %preview(&reply.generated_text, REPLY_PREVIEW),
                "Text request completed"
            );
            Ok(Json(reply))
        }
        Err(e) => {
            error!(%request_id, kind = e.kind(), "Text request failed: {}", e);
            Err(error_response(e, "text"))
        }
    }
}

pub async fn image_completion(
    State(state): State<AppState>,
    payload: Result<Json<ImageRequest>, JsonRejection>,
) -> Result<Json<ImageReply>, HandlerError> {
    let request_id = Uuid::new_v4();
    let request = accept_body(payload, request_id)?;
    let prompt = require_string(request.prompt.as_deref(), "prompt", request_id)?;

    info!(
        %request_id,
        prompt = %preview(prompt, IMAGE_PROMPT_PREVIEW),
        "Forwarding image request"
    );

    let result = match state.upstream.send_image(prompt).await {
        Ok(raw) => {
            info!(
                %request_id,
                status = raw.status,
                bytes = raw.byte_len(),
                content_type = raw.content_type.as_deref().unwrap_or("-"),
                "Upstream image response"
            );
            normalize_image(raw)
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(reply) => {
            info!(%request_id, encoded_len = reply.image.len(), "Image request completed");
            Ok(Json(reply))
        }
        Err(e) => {
            error!(%request_id, kind = e.kind(), "Image request failed: {}", e);
            Err(error_response(e, "image"))
        }
    }
}

fn accept_body<T>(
    payload: Result<Json<T>, JsonRejection>,
    request_id: Uuid,
) -> Result<T, HandlerError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            warn!(%request_id, "Rejected request body: {}", rejection.body_text());
            Err(error_response(
                Error::invalid_request(format!(
                    "Invalid request body: {}",
                    rejection.body_text()
                )),
                "request",
            ))
        }
    }
}

fn require_string<'a>(
    value: Option<&'a str>,
    field: &str,
    request_id: Uuid,
) -> Result<&'a str, HandlerError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => {
            warn!(%request_id, field, "Missing or empty field");
            Err(error_response(
                Error::invalid_request(format!(
                    "Missing '{}' (string) in request body",
                    field
                )),
                "request",
            ))
        }
    }
}

/// Maps the error taxonomy onto an HTTP status and `ProxyError` body.
/// `route` names the upstream call in the error message ("text", "image").
pub fn error_response(err: Error, route: &str) -> HandlerError {
    let (status, body) = match err {
        Error::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, ProxyError::new(msg)),
        Error::UpstreamNonJson { status, body } => (
            forwarded_status(status),
            ProxyError {
                error: "Upstream returned non-JSON response".to_string(),
                details: Some(Value::String(body)),
                status: Some(status),
            },
        ),
        Error::Upstream { status, details } => (
            forwarded_status(status),
            ProxyError {
                error: format!("Upstream {} error", route),
                details: Some(details),
                status: Some(status),
            },
        ),
        e @ Error::UpstreamTimeout { .. } => {
            (StatusCode::GATEWAY_TIMEOUT, ProxyError::new(e.to_string()))
        }
        other => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::new(other.to_string()),
        ),
    };

    (status, Json(body))
}

/// Upstream status when it already signals failure, otherwise 502.
fn forwarded_status(status: u16) -> StatusCode {
    StatusCode::from_u16(status)
        .ok()
        .filter(|s| s.is_client_error() || s.is_server_error())
        .unwrap_or(StatusCode::BAD_GATEWAY)
}

fn preview(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_invalid_request_is_400_without_details() {
        let (status, Json(body)) = error_response(Error::invalid_request("bad"), "text");
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, ProxyError::new("bad"));
    }

    #[test]
    fn test_non_json_forwards_status_and_raw_text() {
        let (status, Json(body)) = error_response(
            Error::UpstreamNonJson {
                status: 503,
                body: "not json".to_string(),
            },
            "text",
        );
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.details, Some(json!("not json")));
        assert_eq!(body.status, Some(503));
    }

    #[test]
    fn test_non_json_with_success_status_becomes_bad_gateway() {
        let (status, Json(body)) = error_response(
            Error::UpstreamNonJson {
                status: 200,
                body: "<html>".to_string(),
            },
            "text",
        );
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body.status, Some(200));
    }

    #[test]
    fn test_upstream_error_names_route() {
        let (status, Json(body)) = error_response(
            Error::Upstream {
                status: 429,
                details: json!({"error": "rate limited"}),
            },
            "image",
        );
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body.error, "Upstream image error");
        assert_eq!(body.details, Some(json!({"error": "rate limited"})));
    }

    #[test]
    fn test_timeout_is_504_and_transport_is_500() {
        let (status, _) = error_response(Error::UpstreamTimeout { secs: 3 }, "text");
        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);

        let (status, Json(body)) = error_response(Error::transport("connection refused"), "text");
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "Transport error: connection refused");
        assert_eq!(body.details, None);
    }

    #[test]
    fn test_preview_respects_char_boundaries() {
        assert_eq!(preview("héllo wörld", 4), "héll");
        assert_eq!(preview("short", 100), "short");
    }
}
