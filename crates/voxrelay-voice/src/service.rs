use crate::config::RetellConfig;
use crate::error::VoiceError;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::{json, Value};

/// Successful reply from the voice API.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: Value,
}

/// Client for the Retell "create web call" endpoint.
///
/// Holds a single `reqwest::Client` so connections are pooled across proxy
/// requests. No retries: each call maps to exactly one upstream request.
#[derive(Debug, Clone)]
pub struct RetellService {
    config: RetellConfig,
    client: reqwest::Client,
}

impl RetellService {
    pub fn new(config: RetellConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("voxrelay/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();
        Self { config, client }
    }

    /// Whether a credential is configured.
    pub fn is_enabled(&self) -> bool {
        !self.config.api_key.is_empty()
    }

    pub fn default_agent_id(&self) -> Option<&str> {
        self.config
            .default_agent_id
            .as_deref()
            .filter(|id| !id.is_empty())
    }

    /// Creates a web call for `agent_id`.
    ///
    /// # Errors
    ///
    /// - [`VoiceError::Config`] if no credential is configured.
    /// - [`VoiceError::Status`] if the API answers with a non-success status.
    /// - [`VoiceError::Transport`] on connect failure or timeout.
    pub async fn create_web_call(&self, agent_id: &str) -> Result<UpstreamReply, VoiceError> {
        if !self.is_enabled() {
            return Err(VoiceError::Config("missing Retell API key".to_string()));
        }

        let response = self
            .client
            .post(self.config.create_web_call_url())
            .header(AUTHORIZATION, format!("Bearer {}", self.config.api_key))
            .header(CONTENT_TYPE, "application/json")
            .json(&json!({ "agent_id": agent_id }))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| self.transport_error(e))?;
        let body = parse_body(&text);

        if !(200..300).contains(&status) {
            return Err(VoiceError::Status { status, body });
        }

        tracing::debug!(status, agent_id, "created web call");
        Ok(UpstreamReply { status, body })
    }

    fn transport_error(&self, err: reqwest::Error) -> VoiceError {
        if err.is_timeout() {
            VoiceError::Transport(format!(
                "timeout of {}ms exceeded",
                self.config.timeout().as_millis()
            ))
        } else {
            VoiceError::Transport(err.to_string())
        }
    }
}

/// Parses a response body as JSON, falling back to a JSON string holding the
/// raw text. An empty body becomes `null`.
fn parse_body(text: &str) -> Value {
    if text.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
