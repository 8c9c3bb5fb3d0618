use thiserror::Error;

#[derive(Error, Debug)]
pub enum VoiceError {
    /// The voice API answered with a non-success status.
    #[error("Request failed with status code {status}")]
    Status {
        status: u16,
        body: serde_json::Value,
    },

    /// The request never produced a response (connect failure, timeout, ...).
    #[error("{0}")]
    Transport(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl VoiceError {
    /// Status code to relay to the proxy caller.
    pub fn status(&self) -> u16 {
        match self {
            Self::Status { status, .. } => *status,
            Self::Transport(_) | Self::Config(_) => 500,
        }
    }

    /// Body to relay to the proxy caller: the upstream body when there is a
    /// usable one, otherwise `{"error": <message>}`.
    pub fn body(&self) -> serde_json::Value {
        match self {
            Self::Status { body, .. } if !is_blank(body) => body.clone(),
            _ => serde_json::json!({ "error": self.to_string() }),
        }
    }
}

fn is_blank(body: &serde_json::Value) -> bool {
    match body {
        serde_json::Value::Null => true,
        serde_json::Value::String(s) => s.is_empty(),
        _ => false,
    }
}
