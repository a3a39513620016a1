//! Wire contract with the model gateway.
//!
//! The gateway accepts the full conversation log in the vendor's
//! `{role, parts: [{text}]}` shape, wrapped as `{"chatHistory": [...]}`.
//! The composed prompt always travels as the trailing `user` entry.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::GatewayError;
use crate::session::{Sender, Turn};

pub mod client;
pub mod server;

pub use client::HttpGateway;

pub const ROLE_USER: &str = "user";
pub const ROLE_MODEL: &str = "model";

/// One text fragment inside a chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

/// One entry of the model-facing conversation log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub parts: Vec<Part>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ROLE_USER.to_string(),
            parts: vec![Part { text: text.into() }],
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: ROLE_MODEL.to_string(),
            parts: vec![Part { text: text.into() }],
        }
    }

    /// Text of the first part, if any.
    pub fn text(&self) -> Option<&str> {
        self.parts.first().map(|p| p.text.as_str())
    }
}

/// Request body sent to the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(rename = "chatHistory")]
    pub chat_history: Vec<ChatMessage>,
}

/// Successful gateway response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextResponse {
    pub text: String,
}

/// Error body the gateway returns on non-success statuses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Map the session history plus the composed prompt into the outgoing
/// log. The prompt replaces nothing: it is appended as one extra user
/// turn, exactly as the script did. The empty opening turn stays in the
/// session history for replay but is skipped on the wire; the vendor
/// rejects empty parts.
pub fn to_wire_history(history: &[Turn], prompt: &str) -> Vec<ChatMessage> {
    let mut wire: Vec<ChatMessage> = history
        .iter()
        .filter(|turn| !turn.text.is_empty())
        .map(|turn| match turn.sender {
            Sender::User => ChatMessage::user(turn.text.clone()),
            Sender::Bot => ChatMessage::model(turn.text.clone()),
        })
        .collect();
    wire.push(ChatMessage::user(prompt));
    wire
}

/// The remote text-generation call, behind a trait so the orchestrator
/// is testable against a scripted gateway.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Send the full log and return the plain-text completion.
    async fn send(&self, chat_history: &[ChatMessage]) -> Result<String, GatewayError>;
}
