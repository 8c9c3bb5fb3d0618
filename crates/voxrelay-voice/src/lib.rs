//! Upstream voice-API client for voxrelay.
//!
//! Wraps the Retell `POST /v2/create-web-call` endpoint: injects the
//! server-held bearer credential, bounds each request with a timeout, and
//! reports non-success replies with their status and body intact so the
//! proxy can relay them verbatim.

pub mod config;
pub mod error;
pub mod service;

pub use config::{RetellConfig, DEFAULT_RETELL_BASE_URL};
pub use error::VoiceError;
pub use service::{RetellService, UpstreamReply};
