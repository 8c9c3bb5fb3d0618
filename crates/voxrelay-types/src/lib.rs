//! Shared wire types for the voxrelay workspace.
//!
//! Both the call proxy and the call widget speak the same JSON shapes: the
//! widget posts a [`CallRequest`] to the proxy, and the proxy answers with a
//! [`CallStartResponse`]. Keeping them here means the two sides cannot drift
//! apart on field names.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Request body accepted by `POST /create-web-call`.
///
/// `agent_id` is optional on the wire; the proxy falls back to its configured
/// default when it is absent or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
}

impl CallRequest {
    pub fn new(agent_id: impl Into<String>) -> Self {
        Self {
            agent_id: Some(agent_id.into()),
        }
    }

    /// Returns the agent id if it is present and non-empty.
    pub fn agent_id(&self) -> Option<&str> {
        non_empty(&self.agent_id)
    }
}

/// Response body returned by the call proxy.
///
/// Exactly one discriminator decides how the widget starts the call; see
/// [`CallStartResponse::start_mode`]. Absent fields are omitted on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallStartResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_call_url: Option<String>,
    /// Legacy spelling of `web_call_url`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

/// How a call should be initiated, derived from a [`CallStartResponse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartMode {
    /// Join directly with the vendor call client using this token.
    AccessToken(String),
    /// Open this URL in a new browsing context; no in-app call state.
    WebCallUrl(String),
    /// Start through the legacy call-object factory.
    LegacyConversation(String),
}

/// The proxy response carried none of the three discriminators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Backend missing access_token, web_call_url, or conversation_id.")]
pub struct ResponseShapeError;

impl CallStartResponse {
    /// Picks the start mode, checking `access_token`, then `web_call_url`,
    /// then `url`, then `conversation_id`. Empty strings count as absent.
    ///
    /// # Errors
    ///
    /// Returns [`ResponseShapeError`] when no discriminator is present.
    pub fn start_mode(&self) -> Result<StartMode, ResponseShapeError> {
        if let Some(token) = non_empty(&self.access_token) {
            return Ok(StartMode::AccessToken(token.to_string()));
        }
        if let Some(url) = non_empty(&self.web_call_url).or_else(|| non_empty(&self.url)) {
            return Ok(StartMode::WebCallUrl(url.to_string()));
        }
        if let Some(conversation_id) = non_empty(&self.conversation_id) {
            return Ok(StartMode::LegacyConversation(conversation_id.to_string()));
        }
        Err(ResponseShapeError)
    }

    /// Reads the modelled fields from any JSON body.
    ///
    /// Fields that are missing or not strings are left as `None`, so one
    /// odd field (`"call_id": 42`) does not hide a usable discriminator.
    pub fn from_value(body: &serde_json::Value) -> Self {
        let field = |name: &str| {
            body.get(name)
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
        };

        Self {
            access_token: field("access_token"),
            web_call_url: field("web_call_url"),
            url: field("url"),
            call_id: field("call_id"),
            conversation_id: field("conversation_id"),
        }
    }

    /// Parses a proxy reply body leniently; see [`CallStartResponse::from_value`].
    ///
    /// # Errors
    ///
    /// Fails only when `bytes` is not JSON at all.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let body: serde_json::Value = serde_json::from_slice(bytes)?;
        Ok(Self::from_value(&body))
    }

    /// Builds the normalized proxy reply from an arbitrary upstream JSON body.
    ///
    /// Returns `None` when the body has neither `access_token` nor
    /// `web_call_url`; callers then forward the raw body untouched.
    pub fn normalize_upstream(body: &serde_json::Value) -> Option<Self> {
        let response = Self {
            url: None,
            ..Self::from_value(body)
        };

        let has_token = non_empty(&response.access_token).is_some();
        if has_token || non_empty(&response.web_call_url).is_some() {
            Some(response)
        } else {
            None
        }
    }
}

/// Lifecycle state of the call widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CallLifecycleState {
    #[default]
    Idle,
    Connecting,
    InCall,
}

impl CallLifecycleState {
    /// Returns `true` while a call is being set up or is live.
    pub fn is_busy(self) -> bool {
        matches!(self, Self::Connecting | Self::InCall)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Connecting => "connecting",
            Self::InCall => "in_call",
        }
    }
}

impl fmt::Display for CallLifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
