use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Agent the widget asks the proxy to call.
pub const DEFAULT_AGENT_ID: &str = "agent_8e3ee5fa5f3ee9e20ea6cbcccf";

/// Proxy endpoint used when none is configured.
pub const DEFAULT_PROXY_URL: &str = "http://localhost:3001/create-web-call";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Full URL of the proxy's `create-web-call` route.
    pub proxy_url: String,
    pub agent_id: String,
    /// Upper bound on each step of call setup, and on how long the widget
    /// waits in `Connecting` for the call client to report the call started.
    pub connect_timeout_secs: u64,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            proxy_url: DEFAULT_PROXY_URL.to_string(),
            agent_id: DEFAULT_AGENT_ID.to_string(),
            connect_timeout_secs: 30,
        }
    }
}

impl WidgetConfig {
    pub fn new(proxy_url: impl Into<String>, agent_id: impl Into<String>) -> Self {
        Self {
            proxy_url: proxy_url.into(),
            agent_id: agent_id.into(),
            ..Self::default()
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: WidgetConfig =
            toml::from_str(r#"proxy_url = "https://relay.example/create-web-call""#).unwrap();
        assert_eq!(config.proxy_url, "https://relay.example/create-web-call");
        assert_eq!(config.agent_id, DEFAULT_AGENT_ID);
        assert_eq!(config.connect_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn new_overrides_url_and_agent() {
        let config = WidgetConfig::new("http://x/create-web-call", "agent_1");
        assert_eq!(config.agent_id, "agent_1");
        assert_eq!(config.connect_timeout_secs, 30);
    }
}
