//! Typed error hierarchy for the conversation controller.
//!
//! Two enums cover the two failure surfaces:
//! - `GatewayError` — the remote generation call from the client side
//! - `ServeError` — proxy-side configuration problems
//!
//! All `GatewayError` variants collapse into one user-visible apology at
//! the orchestrator; the variants exist for logs and tests.

use thiserror::Error;

/// Failures of the remote generation call, as seen by the client.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Transport failure reaching the gateway: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Gateway returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Gateway response had no text field")]
    MalformedResponse,
}

impl GatewayError {
    /// The single apology shown to the student, regardless of cause.
    /// Matches the script's tone; the concrete cause goes to the log.
    pub fn apology(&self) -> &'static str {
        match self {
            GatewayError::Transport(_) => {
                "Disculpá, no pude generar una respuesta. Parece haber un problema \
                 de conexión o con el servidor. Por favor, intentá de nuevo."
            }
            GatewayError::Status { .. } => {
                "Disculpá, hubo un problema en el servidor. Por favor, intentá de \
                 nuevo más tarde."
            }
            GatewayError::MalformedResponse => {
                "Disculpá, no pude generar una respuesta. Hubo un problema con la \
                 respuesta del modelo."
            }
        }
    }
}

/// Proxy-side failures that prevent serving at all.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("GEMINI_API_KEY is not set; the proxy cannot authenticate to the vendor")]
    MissingCredential,

    #[error("Failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}
