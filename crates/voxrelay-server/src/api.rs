//! API handlers for the call proxy.

use crate::AppState;
use axum::{
    body::Bytes,
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use voxrelay_types::{CallRequest, CallStartResponse};
use voxrelay_voice::VoiceError;

/// API error type mapping to HTTP status codes.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    /// The server is missing required configuration (the credential).
    #[error("{0}")]
    Configuration(String),
    /// The voice API failed; its status and body are relayed.
    #[error("upstream error: {0}")]
    Upstream(#[from] VoiceError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "error": msg }),
            ),
            ApiError::Configuration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({ "error": msg }),
            ),
            ApiError::Upstream(err) => (status_code(err.status()), err.body()),
        };

        (status, Json(body)).into_response()
    }
}

/// Handler for `POST /create-web-call`.
///
/// The body is optional. The agent id comes from `body.agent_id`, falling
/// back to the configured default. A reply carrying `access_token` or
/// `web_call_url` is trimmed to the four fields the widget reads; any other
/// successful reply is forwarded verbatim.
pub async fn create_web_call_handler(
    Extension(state): Extension<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let request = parse_call_request(&body)?;

    let agent_id = request
        .agent_id()
        .or_else(|| state.retell.default_agent_id())
        .ok_or_else(|| {
            ApiError::BadRequest(
                "agent_id is required (body.agent_id or env AGENT_ID)".to_string(),
            )
        })?
        .to_string();

    if !state.retell.is_enabled() {
        return Err(ApiError::Configuration(
            "Server missing RETELL_API_KEY / API_KEY".to_string(),
        ));
    }

    let reply = match state.retell.create_web_call(&agent_id).await {
        Ok(reply) => reply,
        Err(err) => {
            tracing::error!(
                status = err.status(),
                body = %err.body(),
                agent_id = %agent_id,
                "error from Retell"
            );
            return Err(ApiError::Upstream(err));
        }
    };

    let status = status_code(reply.status);
    let response = match CallStartResponse::normalize_upstream(&reply.body) {
        Some(normalized) => (status, Json(normalized)).into_response(),
        None => {
            tracing::debug!(status = reply.status, "forwarding raw upstream body");
            (status, Json(reply.body)).into_response()
        }
    };

    Ok(response)
}

/// Parses the optional request body. Empty and non-object bodies carry no
/// agent id; malformed JSON is rejected.
fn parse_call_request(body: &[u8]) -> Result<CallRequest, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(CallRequest::default());
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("invalid JSON body: {}", e)))?;
    if !value.is_object() {
        return Ok(CallRequest::default());
    }

    serde_json::from_value(value)
        .map_err(|e| ApiError::BadRequest(format!("invalid request body: {}", e)))
}

fn status_code(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}
