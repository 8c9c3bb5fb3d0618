//! Capabilities the widget is constructed with.
//!
//! The vendor call client, the optional legacy call factory, the browser and
//! the user-facing notifier are all injected, so the widget holds no hidden
//! global state and tests can substitute fakes.

use crate::error::WidgetError;
use async_trait::async_trait;
use voxrelay_types::{CallRequest, CallStartResponse};

/// Asks the call proxy to create a web call.
#[async_trait]
pub trait CallProxy: Send + Sync {
    async fn create_web_call(
        &self,
        request: &CallRequest,
    ) -> Result<CallStartResponse, WidgetError>;
}

/// Adapter over the vendor call client.
///
/// `terminate` absorbs whatever the vendor calls its hang-up operation; an
/// adapter may try several and report the first failure.
#[async_trait]
pub trait CallClient: Send + Sync {
    /// Joins a call with an access token. Completion means the join was
    /// requested; the call is live only once `CallStarted` is delivered.
    async fn start_call(&self, access_token: &str) -> Result<(), WidgetError>;

    async fn terminate(&self) -> Result<(), WidgetError>;
}

/// Factory for calls started from a bare conversation id.
#[async_trait]
pub trait LegacyCallFactory: Send + Sync {
    async fn create_call_object(
        &self,
        conversation_id: &str,
    ) -> Result<Box<dyn LegacyCall>, WidgetError>;
}

#[async_trait]
pub trait LegacyCall: Send + Sync {
    async fn start(&mut self) -> Result<(), WidgetError>;

    async fn terminate(&mut self) -> Result<(), WidgetError>;
}

/// Opens a URL in a new browsing context without waiting on it.
pub trait UrlOpener: Send + Sync {
    fn open(&self, url: &str) -> Result<(), WidgetError>;
}

/// Shows an error to the user.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Opens URLs with the platform's default browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBrowser;

impl UrlOpener for SystemBrowser {
    fn open(&self, url: &str) -> Result<(), WidgetError> {
        open::that_detached(url).map_err(|e| WidgetError::Open {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Reports user-facing errors through the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        tracing::error!(error = message, "call widget error");
    }
}
