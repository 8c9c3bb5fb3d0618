//! Call widget for voxrelay.
//!
//! A long-lived client-side component with three states (idle, connecting,
//! in call). It asks the call proxy for call credentials, picks a start mode
//! from the reply, drives the vendor call client accordingly, and folds the
//! client's `call_started` / `call_ended` / `error` events back into state.
//!
//! The state rules live in [`state::transition`], a pure function. The
//! [`Widget`] wraps it with the effects: network, the call client, the
//! optional legacy call factory, the browser and the user notifier, all
//! injected at construction.
//!
//! # Start modes
//!
//! Checked in priority order on the proxy reply:
//!
//! - `access_token`: join with the call client; in call once it reports
//!   `call_started`
//! - `web_call_url` / `url`: open in the browser; back to idle immediately
//! - `conversation_id`: start through the legacy factory, if one was given

pub mod capability;
pub mod config;
pub mod error;
pub mod proxy;
pub mod state;
pub mod widget;

pub use capability::{
    CallClient, CallProxy, LegacyCall, LegacyCallFactory, LogNotifier, Notifier, SystemBrowser,
    UrlOpener,
};
pub use config::{WidgetConfig, DEFAULT_AGENT_ID, DEFAULT_PROXY_URL};
pub use error::WidgetError;
pub use proxy::HttpCallProxy;
pub use state::{control_view, transition, CallEvent, ControlAction, ControlView, Input};
pub use voxrelay_types::CallLifecycleState;
pub use widget::{Widget, WidgetCommand, WidgetHandle};
