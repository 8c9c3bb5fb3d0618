use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Production Retell API base URL.
pub const DEFAULT_RETELL_BASE_URL: &str = "https://api.retellai.com";

fn default_base_url() -> String {
    DEFAULT_RETELL_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Clone, Serialize, Deserialize)]
pub struct RetellConfig {
    /// Bearer credential injected into every upstream request. Empty means
    /// "not configured"; the proxy then refuses requests with a 500.
    #[serde(default, skip_serializing)]
    pub api_key: String,
    /// Agent used when the caller does not name one.
    #[serde(default)]
    pub default_agent_id: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Upstream request timeout in seconds. Default: 10.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RetellConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            default_agent_id: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl fmt::Debug for RetellConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetellConfig")
            .field("api_key", &"[REDACTED]")
            .field("default_agent_id", &self.default_agent_id)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl RetellConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_default_agent(mut self, agent_id: impl Into<String>) -> Self {
        self.default_agent_id = Some(agent_id.into());
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Endpoint that creates a browser web call.
    pub fn create_web_call_url(&self) -> String {
        format!("{}/v2/create-web-call", self.base_url.trim_end_matches('/'))
    }
}
