use std::time::Duration;
use thiserror::Error;
use voxrelay_types::ResponseShapeError;

/// Errors raised while starting or ending a call.
///
/// Every variant reaching the top of `start_call` is shown to the user and
/// resets the widget to idle. Errors from `end_call` are only logged.
#[derive(Error, Debug)]
pub enum WidgetError {
    /// The call proxy answered with a non-success status.
    #[error("Backend {status}: {body}")]
    Backend { status: u16, body: String },

    /// The call proxy could not be reached.
    #[error("Backend request failed: {0}")]
    Transport(String),

    /// The call proxy answered 2xx with a body that is not a call response.
    #[error("Backend returned an unreadable response: {0}")]
    InvalidResponse(String),

    #[error(transparent)]
    ResponseShape(#[from] ResponseShapeError),

    #[error("Legacy SDK not available.")]
    LegacySdkUnavailable,

    /// The vendor call client (or legacy call object) failed.
    #[error("Call client error: {0}")]
    CallClient(String),

    #[error("Failed to open {url}: {reason}")]
    Open { url: String, reason: String },

    #[error("{what} timed out after {after:?}")]
    Timeout { what: &'static str, after: Duration },
}
