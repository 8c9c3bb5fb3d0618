//! The call widget: effects around the pure transition function.

use crate::capability::{
    CallClient, CallProxy, LegacyCall, LegacyCallFactory, LogNotifier, Notifier, SystemBrowser,
    UrlOpener,
};
use crate::config::WidgetConfig;
use crate::error::WidgetError;
use crate::proxy::HttpCallProxy;
use crate::state::{control_view, transition, CallEvent, ControlAction, ControlView, Input};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;
use voxrelay_types::{CallLifecycleState, CallRequest, StartMode};

/// Default capacity for the widget command queue.
const DEFAULT_COMMAND_CAPACITY: usize = 64;

/// Work delivered to [`Widget::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetCommand {
    /// The call button was pressed.
    Click,
    /// End the call regardless of the button state.
    End,
    /// An event from the vendor call client.
    Event(CallEvent),
}

/// Cloneable sender side of a widget's command queue.
///
/// Call-client adapters hold one of these to deliver their events.
#[derive(Debug, Clone)]
pub struct WidgetHandle {
    tx: mpsc::Sender<WidgetCommand>,
}

impl WidgetHandle {
    /// Creates a handle and the receiver to pass to [`Widget::run`].
    pub fn channel() -> (Self, mpsc::Receiver<WidgetCommand>) {
        let (tx, rx) = mpsc::channel(DEFAULT_COMMAND_CAPACITY);
        (Self { tx }, rx)
    }

    /// Returns `false` once the widget loop has stopped.
    pub async fn click(&self) -> bool {
        self.tx.send(WidgetCommand::Click).await.is_ok()
    }

    pub async fn end(&self) -> bool {
        self.tx.send(WidgetCommand::End).await.is_ok()
    }

    pub async fn event(&self, event: CallEvent) -> bool {
        self.tx.send(WidgetCommand::Event(event)).await.is_ok()
    }
}

/// Client-side call lifecycle driver.
///
/// All mutation goes through `&mut self`, so user actions and call-client
/// events are applied one at a time. At most one call exists: `start_call`
/// does nothing unless the widget is idle.
pub struct Widget {
    config: WidgetConfig,
    state: CallLifecycleState,
    connecting_since: Option<Instant>,
    proxy: Arc<dyn CallProxy>,
    client: Arc<dyn CallClient>,
    legacy: Option<Arc<dyn LegacyCallFactory>>,
    legacy_call: Option<Box<dyn LegacyCall>>,
    opener: Arc<dyn UrlOpener>,
    notifier: Arc<dyn Notifier>,
    state_tx: watch::Sender<CallLifecycleState>,
}

impl Widget {
    /// Creates an idle widget. URLs open in the system browser and errors
    /// are reported through the log until overridden.
    pub fn new(
        config: WidgetConfig,
        proxy: Arc<dyn CallProxy>,
        client: Arc<dyn CallClient>,
    ) -> Self {
        let (state_tx, _) = watch::channel(CallLifecycleState::Idle);
        Self {
            config,
            state: CallLifecycleState::Idle,
            connecting_since: None,
            proxy,
            client,
            legacy: None,
            legacy_call: None,
            opener: Arc::new(SystemBrowser),
            notifier: Arc::new(LogNotifier),
            state_tx,
        }
    }

    /// Creates a widget that reaches the proxy over HTTP at `config.proxy_url`.
    pub fn with_http_proxy(config: WidgetConfig, client: Arc<dyn CallClient>) -> Self {
        let proxy = Arc::new(HttpCallProxy::new(&config));
        Self::new(config, proxy, client)
    }

    pub fn with_legacy_factory(mut self, factory: Arc<dyn LegacyCallFactory>) -> Self {
        self.legacy = Some(factory);
        self
    }

    pub fn with_url_opener(mut self, opener: Arc<dyn UrlOpener>) -> Self {
        self.opener = opener;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn state(&self) -> CallLifecycleState {
        self.state
    }

    pub fn control(&self) -> ControlView {
        control_view(self.state)
    }

    /// Watches state changes, e.g. to re-render the call button.
    pub fn subscribe(&self) -> watch::Receiver<CallLifecycleState> {
        self.state_tx.subscribe()
    }

    /// When a `Connecting` state should be given up, if one is pending.
    pub fn connect_deadline(&self) -> Option<Instant> {
        match (self.state, self.connecting_since) {
            (CallLifecycleState::Connecting, Some(since)) => {
                Some(since + self.config.connect_timeout())
            }
            _ => None,
        }
    }

    /// Dispatches a button press: ends the call when in one, otherwise
    /// tries to start one.
    pub async fn click(&mut self) {
        match self.control().action {
            ControlAction::EndCall => self.end_call().await,
            ControlAction::StartCall => self.start_call().await,
        }
    }

    /// Starts a call through the proxy.
    ///
    /// Ignored while connecting or in a call. Any failure is shown through
    /// the notifier and leaves the widget idle.
    pub async fn start_call(&mut self) {
        if self.state.is_busy() {
            tracing::debug!(state = %self.state, "start_call ignored, call already active");
            return;
        }

        self.apply(Input::StartRequested);

        if let Err(err) = self.initiate().await {
            tracing::error!(error = %err, "error starting call");
            self.notifier.notify(&err.to_string());
            self.apply(Input::InitiationFailed);
        }
    }

    async fn initiate(&mut self) -> Result<(), WidgetError> {
        let timeout = self.config.connect_timeout();
        let request = CallRequest::new(self.config.agent_id.clone());

        let response = bounded(
            "backend request",
            timeout,
            self.proxy.create_web_call(&request),
        )
        .await?;

        match response.start_mode()? {
            StartMode::AccessToken(token) => {
                bounded(
                    "call client start",
                    timeout,
                    self.client.start_call(&token),
                )
                .await?;
                // Stay connecting; the CallStarted event completes the setup.
                tracing::info!("call client started, waiting for call_started");
            }
            StartMode::WebCallUrl(url) => {
                self.opener.open(&url)?;
                tracing::info!(%url, "opened web call in browser");
                self.apply(Input::RedirectOpened);
            }
            StartMode::LegacyConversation(conversation_id) => {
                let factory = self
                    .legacy
                    .clone()
                    .ok_or(WidgetError::LegacySdkUnavailable)?;
                let call = bounded("legacy call start", timeout, async {
                    let mut call = factory.create_call_object(&conversation_id).await?;
                    call.start().await?;
                    Ok(call)
                })
                .await?;
                self.legacy_call = Some(call);
                self.apply(Input::LegacyCallStarted);
            }
        }

        Ok(())
    }

    /// Ends the current call.
    ///
    /// Termination is best effort: failures are logged as warnings and never
    /// shown to the user. The widget is idle afterwards in every case.
    pub async fn end_call(&mut self) {
        let timeout = self.config.connect_timeout();

        if let Some(mut call) = self.legacy_call.take() {
            if let Err(err) = bounded("legacy call terminate", timeout, call.terminate()).await {
                tracing::warn!(error = %err, "end call warning");
            }
        }

        if let Err(err) =
            bounded("call client terminate", timeout, self.client.terminate()).await
        {
            tracing::warn!(error = %err, "end call warning");
        }

        self.apply(Input::EndRequested);
    }

    /// Applies an event from the vendor call client.
    pub fn handle_event(&mut self, event: CallEvent) {
        if let CallEvent::Error(message) = &event {
            tracing::error!(error = %message, "call client error");
        }
        self.apply(Input::Event(event));
    }

    /// Gives up on a `Connecting` state whose deadline has passed by `now`.
    ///
    /// Returns `true` if the widget was reset.
    pub fn expire_connecting(&mut self, now: Instant) -> bool {
        match self.connect_deadline() {
            Some(deadline) if now >= deadline => {
                let err = WidgetError::Timeout {
                    what: "call connection",
                    after: self.config.connect_timeout(),
                };
                tracing::error!(error = %err, "error starting call");
                self.notifier.notify(&err.to_string());
                self.apply(Input::ConnectTimedOut);
                true
            }
            _ => false,
        }
    }

    /// Runs the widget until every [`WidgetHandle`] is dropped.
    ///
    /// Commands are handled one at a time in arrival order. While connecting,
    /// the connect deadline is armed alongside the queue.
    pub async fn run(mut self, mut commands: mpsc::Receiver<WidgetCommand>) {
        loop {
            let command = match self.connect_deadline() {
                Some(deadline) => tokio::select! {
                    command = commands.recv() => command,
                    () = tokio::time::sleep_until(deadline) => {
                        self.expire_connecting(Instant::now());
                        continue;
                    }
                },
                None => commands.recv().await,
            };

            let Some(command) = command else {
                break;
            };

            match command {
                WidgetCommand::Click => self.click().await,
                WidgetCommand::End => self.end_call().await,
                WidgetCommand::Event(event) => self.handle_event(event),
            }
        }

        tracing::debug!("widget command queue closed");
    }

    fn apply(&mut self, input: Input) {
        let previous = self.state;
        let next = transition(previous, &input);

        if next != previous {
            tracing::info!(from = %previous, to = %next, ?input, "call state changed");
        }

        match next {
            CallLifecycleState::Connecting if previous != CallLifecycleState::Connecting => {
                self.connecting_since = Some(Instant::now());
            }
            CallLifecycleState::Connecting => {}
            CallLifecycleState::Idle => {
                self.connecting_since = None;
                self.legacy_call = None;
            }
            CallLifecycleState::InCall => {
                self.connecting_since = None;
            }
        }

        self.state = next;
        self.state_tx.send_replace(next);
    }
}

/// Bounds a setup or teardown step by `after`.
async fn bounded<T, F>(what: &'static str, after: Duration, step: F) -> Result<T, WidgetError>
where
    F: Future<Output = Result<T, WidgetError>>,
{
    tokio::time::timeout(after, step)
        .await
        .map_err(|_| WidgetError::Timeout { what, after })?
}
