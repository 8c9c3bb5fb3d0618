//! Fake capabilities for driving the widget without a vendor SDK.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use voxrelay_types::{CallRequest, CallStartResponse};
use voxrelay_widget::{
    CallClient, CallProxy, LegacyCall, LegacyCallFactory, Notifier, UrlOpener, Widget,
    WidgetConfig, WidgetError,
};

pub enum Reply {
    Body(serde_json::Value),
    Backend(u16, &'static str),
    Hang,
}

/// Proxy that answers every request with the same reply.
pub struct FakeProxy {
    reply: Reply,
    pub requests: Mutex<Vec<CallRequest>>,
}

impl FakeProxy {
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn body(value: serde_json::Value) -> Arc<Self> {
        Self::new(Reply::Body(value))
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl CallProxy for FakeProxy {
    async fn create_web_call(
        &self,
        request: &CallRequest,
    ) -> Result<CallStartResponse, WidgetError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Reply::Body(value) => Ok(CallStartResponse::from_value(value)),
            Reply::Backend(status, body) => Err(WidgetError::Backend {
                status: *status,
                body: body.to_string(),
            }),
            Reply::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(WidgetError::Transport("unreachable".into()))
            }
        }
    }
}

/// Call client that records tokens and terminate calls.
#[derive(Default)]
pub struct FakeClient {
    pub tokens: Mutex<Vec<String>>,
    pub terminations: AtomicUsize,
    pub fail_start: bool,
    pub fail_terminate: bool,
}

impl FakeClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing_terminate() -> Arc<Self> {
        Arc::new(Self {
            fail_terminate: true,
            ..Self::default()
        })
    }

    pub fn failing_start() -> Arc<Self> {
        Arc::new(Self {
            fail_start: true,
            ..Self::default()
        })
    }

    pub fn started_tokens(&self) -> Vec<String> {
        self.tokens.lock().unwrap().clone()
    }

    pub fn termination_count(&self) -> usize {
        self.terminations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CallClient for FakeClient {
    async fn start_call(&self, access_token: &str) -> Result<(), WidgetError> {
        self.tokens.lock().unwrap().push(access_token.to_string());
        if self.fail_start {
            return Err(WidgetError::CallClient("microphone permission denied".into()));
        }
        Ok(())
    }

    async fn terminate(&self) -> Result<(), WidgetError> {
        self.terminations.fetch_add(1, Ordering::SeqCst);
        if self.fail_terminate {
            return Err(WidgetError::CallClient("stopCall is not a function".into()));
        }
        Ok(())
    }
}

/// Legacy factory whose call objects count starts and terminations.
#[derive(Default)]
pub struct FakeLegacyFactory {
    pub conversations: Mutex<Vec<String>>,
    pub starts: Arc<AtomicUsize>,
    pub terminations: Arc<AtomicUsize>,
    pub fail_create: bool,
    pub fail_start: bool,
}

impl FakeLegacyFactory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing_create() -> Arc<Self> {
        Arc::new(Self {
            fail_create: true,
            ..Self::default()
        })
    }

    pub fn failing_start() -> Arc<Self> {
        Arc::new(Self {
            fail_start: true,
            ..Self::default()
        })
    }
}

struct FakeLegacyCall {
    starts: Arc<AtomicUsize>,
    terminations: Arc<AtomicUsize>,
    fail_start: bool,
}

#[async_trait]
impl LegacyCallFactory for FakeLegacyFactory {
    async fn create_call_object(
        &self,
        conversation_id: &str,
    ) -> Result<Box<dyn LegacyCall>, WidgetError> {
        self.conversations
            .lock()
            .unwrap()
            .push(conversation_id.to_string());
        if self.fail_create {
            return Err(WidgetError::CallClient("createCallObject failed".into()));
        }
        Ok(Box::new(FakeLegacyCall {
            starts: self.starts.clone(),
            terminations: self.terminations.clone(),
            fail_start: self.fail_start,
        }))
    }
}

#[async_trait]
impl LegacyCall for FakeLegacyCall {
    async fn start(&mut self) -> Result<(), WidgetError> {
        self.starts.fetch_add(1, Ordering::SeqCst);
        if self.fail_start {
            return Err(WidgetError::CallClient("join rejected".into()));
        }
        Ok(())
    }

    async fn terminate(&mut self) -> Result<(), WidgetError> {
        self.terminations.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingOpener {
    pub urls: Mutex<Vec<String>>,
    pub fail: bool,
}

impl RecordingOpener {
    /// An opener that records the URL and then reports no browser.
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            ..Self::default()
        })
    }
}

impl UrlOpener for RecordingOpener {
    fn open(&self, url: &str) -> Result<(), WidgetError> {
        self.urls.lock().unwrap().push(url.to_string());
        if self.fail {
            return Err(WidgetError::Open {
                url: url.to_string(),
                reason: "no browser available".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// Everything a test needs to inspect after driving a widget.
pub struct Harness {
    pub widget: Widget,
    pub proxy: Arc<FakeProxy>,
    pub client: Arc<FakeClient>,
    pub opener: Arc<RecordingOpener>,
    pub notifier: Arc<RecordingNotifier>,
}

pub fn config() -> WidgetConfig {
    WidgetConfig {
        proxy_url: "http://proxy.invalid/create-web-call".to_string(),
        agent_id: "agent_8d6d93979343a84e1cdce8a15c".to_string(),
        connect_timeout_secs: 5,
    }
}

pub fn harness(proxy: Arc<FakeProxy>, client: Arc<FakeClient>) -> Harness {
    let opener = Arc::new(RecordingOpener::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let widget = Widget::new(config(), proxy.clone(), client.clone())
        .with_url_opener(opener.clone())
        .with_notifier(notifier.clone());
    Harness {
        widget,
        proxy,
        client,
        opener,
        notifier,
    }
}
