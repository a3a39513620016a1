//! HTTP client for the gateway proxy.
//!
//! One POST per turn, bounded by a timeout, no retry. The three
//! failure modes (transport, non-success status, malformed body) map to
//! distinct [`GatewayError`] variants; the orchestrator collapses them
//! into a single apology for the student.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::{ChatMessage, ChatRequest, ErrorResponse, ModelGateway, TextResponse};
use crate::errors::GatewayError;

/// Gateway client over `reqwest`. The vendor credential lives on the
/// proxy side only; this client never sees it.
pub struct HttpGateway {
    http: reqwest::Client,
    url: String,
}

impl HttpGateway {
    /// Build a client for the proxy at `url` with a per-request timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }
}

#[async_trait]
impl ModelGateway for HttpGateway {
    async fn send(&self, chat_history: &[ChatMessage]) -> Result<String, GatewayError> {
        let request = ChatRequest {
            chat_history: chat_history.to_vec(),
        };
        debug!(turns = chat_history.len(), url = %self.url, "calling gateway");

        let response = self
            .http
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(GatewayError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorResponse>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| "respuesta de error sin cuerpo".to_string());
            return Err(GatewayError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .json::<TextResponse>()
            .await
            .map_err(|_| GatewayError::MalformedResponse)?;
        if body.text.trim().is_empty() {
            return Err(GatewayError::MalformedResponse);
        }
        Ok(body.text)
    }
}
