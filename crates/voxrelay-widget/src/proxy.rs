use crate::capability::CallProxy;
use crate::config::WidgetConfig;
use crate::error::WidgetError;
use async_trait::async_trait;
use voxrelay_types::{CallRequest, CallStartResponse};

/// [`CallProxy`] over HTTP: `POST <proxy_url>` with `{agent_id}`.
#[derive(Debug, Clone)]
pub struct HttpCallProxy {
    client: reqwest::Client,
    url: String,
}

impl HttpCallProxy {
    pub fn new(config: &WidgetConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.connect_timeout())
            .build()
            .unwrap_or_default();
        Self {
            client,
            url: config.proxy_url.clone(),
        }
    }

}

#[async_trait]
impl CallProxy for HttpCallProxy {
    async fn create_web_call(
        &self,
        request: &CallRequest,
    ) -> Result<CallStartResponse, WidgetError> {
        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| WidgetError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // Prefer the proxy's body; fall back to the status text.
            let text = response.text().await.unwrap_or_default();
            let body = if text.is_empty() {
                status.canonical_reason().unwrap_or_default().to_string()
            } else {
                text
            };
            return Err(WidgetError::Backend {
                status: status.as_u16(),
                body,
            });
        }

        // Relayed upstream bodies are untyped; read only the string fields.
        let bytes = response
            .bytes()
            .await
            .map_err(|e| WidgetError::Transport(e.to_string()))?;
        CallStartResponse::from_slice(&bytes)
            .map_err(|e| WidgetError::InvalidResponse(e.to_string()))
    }
}
