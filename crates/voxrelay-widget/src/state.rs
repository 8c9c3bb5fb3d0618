//! Pure call-lifecycle transitions.
//!
//! The widget shell performs effects (network, call client) and reports what
//! happened as an [`Input`]; [`transition`] alone decides the next state. No
//! I/O happens here, so every rule is testable without a call client.

use voxrelay_types::CallLifecycleState;

/// Asynchronous notifications from the vendor call client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallEvent {
    CallStarted,
    CallEnded,
    Error(String),
}

/// Everything that can move the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// The user asked to start a call.
    StartRequested,
    /// The proxy returned a web-call URL and it was opened externally.
    RedirectOpened,
    /// A legacy call object was created and started.
    LegacyCallStarted,
    /// Call setup failed at any step.
    InitiationFailed,
    /// The user asked to end the call.
    EndRequested,
    /// The call client never reported `CallStarted` in time.
    ConnectTimedOut,
    Event(CallEvent),
}

/// Computes the next state.
///
/// `StartRequested` is ignored unless idle, and `ConnectTimedOut` only
/// applies while connecting. Call-ended and error events are idempotent.
pub fn transition(state: CallLifecycleState, input: &Input) -> CallLifecycleState {
    use CallLifecycleState::{Connecting, Idle, InCall};

    match input {
        Input::StartRequested if state == Idle => Connecting,
        Input::StartRequested => state,
        Input::ConnectTimedOut if state == Connecting => Idle,
        Input::ConnectTimedOut => state,
        Input::LegacyCallStarted | Input::Event(CallEvent::CallStarted) => InCall,
        Input::RedirectOpened
        | Input::InitiationFailed
        | Input::EndRequested
        | Input::Event(CallEvent::CallEnded)
        | Input::Event(CallEvent::Error(_)) => Idle,
    }
}

/// What the single call button should do when clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    StartCall,
    EndCall,
}

/// Rendering of the call button, derived purely from state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlView {
    pub label: &'static str,
    pub enabled: bool,
    pub action: ControlAction,
}

pub fn control_view(state: CallLifecycleState) -> ControlView {
    match state {
        CallLifecycleState::Idle => ControlView {
            label: "start call",
            enabled: true,
            action: ControlAction::StartCall,
        },
        CallLifecycleState::Connecting => ControlView {
            label: "connecting…",
            enabled: false,
            action: ControlAction::StartCall,
        },
        CallLifecycleState::InCall => ControlView {
            label: "end call",
            enabled: true,
            action: ControlAction::EndCall,
        },
    }
}
