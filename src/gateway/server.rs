//! Gateway proxy: the only component that holds the vendor credential.
//!
//! `brujula serve` exposes `POST /api/gemini`, validates the incoming
//! conversation log, forwards it to the Gemini API and returns the
//! plain-text completion as `{"text": ...}`. Error surface, per the
//! boundary contract:
//! - wrong method → 405
//! - malformed `chatHistory` / missing trailing user text → 400 with a
//!   specific message
//! - missing credential or vendor failure → 500 with a generic message,
//!   detail logged server-side only

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use super::{ChatMessage, TextResponse};
use crate::errors::ServeError;

const DEFAULT_VENDOR_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

/// Cap on completion length, same value the original proxy used.
const MAX_OUTPUT_TOKENS: u32 = 2000;

/// Configuration for the proxy server.
pub struct ServerConfig {
    pub port: u16,
    /// Vendor credential; absence is reported per-request as a generic
    /// 500, never echoed to the caller.
    pub api_key: Option<String>,
    /// Overridable for tests; defaults to the Gemini endpoint.
    pub vendor_url: String,
    /// Permissive CORS for local frontend development.
    pub dev_mode: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8787,
            api_key: None,
            vendor_url: DEFAULT_VENDOR_URL.to_string(),
            dev_mode: false,
        }
    }
}

/// Shared state for the proxy handlers.
pub struct AppState {
    api_key: Option<String>,
    vendor_url: String,
    http: reqwest::Client,
}

impl AppState {
    pub fn new(api_key: Option<String>, vendor_url: impl Into<String>) -> Self {
        Self {
            api_key,
            vendor_url: vendor_url.into(),
            http: reqwest::Client::new(),
        }
    }
}

/// Build the proxy router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/gemini", post(generate))
        .with_state(state)
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// POST /api/gemini — forward the conversation log to the vendor.
///
/// The body is taken as a raw JSON value so shape problems surface as
/// the contract's 400s rather than an extractor rejection.
async fn generate(State(state): State<Arc<AppState>>, Json(body): Json<serde_json::Value>) -> Response {
    let Some(api_key) = state.api_key.as_deref() else {
        error!("GEMINI_API_KEY is not configured; rejecting generation request");
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Error de configuración del servidor: Clave de API no encontrada.",
        );
    };

    let Some(history_value) = body.get("chatHistory").filter(|v| v.is_array()) else {
        return error_response(StatusCode::BAD_REQUEST, "Formato de chatHistory inválido.");
    };
    let Ok(history) = serde_json::from_value::<Vec<ChatMessage>>(history_value.clone()) else {
        return error_response(StatusCode::BAD_REQUEST, "Formato de chatHistory inválido.");
    };

    let last_user_text = history
        .last()
        .and_then(ChatMessage::text)
        .filter(|text| !text.is_empty());
    if last_user_text.is_none() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Mensaje de usuario no encontrado en el historial.",
        );
    }

    match call_vendor(&state, api_key, &history).await {
        Ok(text) => (StatusCode::OK, Json(TextResponse { text })).into_response(),
        Err(err) => {
            error!(error = %format!("{err:#}"), "vendor generation call failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error interno del servidor al procesar la solicitud.",
            )
        }
    }
}

/// Issue the `generateContent` call and pull the completion text out of
/// the first candidate.
async fn call_vendor(state: &AppState, api_key: &str, history: &[ChatMessage]) -> Result<String> {
    let request = json!({
        "contents": history,
        "generationConfig": { "maxOutputTokens": MAX_OUTPUT_TOKENS },
    });

    let response = state
        .http
        .post(&state.vendor_url)
        .header("x-goog-api-key", api_key)
        .json(&request)
        .send()
        .await
        .context("Failed to reach the generation vendor")?
        .error_for_status()
        .context("Vendor returned an error status")?;

    let body: serde_json::Value = response
        .json()
        .await
        .context("Failed to parse vendor response")?;

    let text = body
        .pointer("/candidates/0/content/parts")
        .and_then(|parts| parts.as_array())
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
                .collect::<Vec<_>>()
                .join("")
        })
        .filter(|text| !text.is_empty())
        .context("Vendor response contained no candidate text")?;

    Ok(text)
}

/// Start the proxy and serve until ctrl-c.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    if config.api_key.is_none() {
        // Serve anyway (requests get the generic 500) but be loud about it.
        error!("{}", ServeError::MissingCredential);
    }

    let state = Arc::new(AppState::new(config.api_key, config.vendor_url));
    let mut app = build_router(state);
    if config.dev_mode {
        app = app.layer(CorsLayer::permissive());
    }

    let addr = format!("127.0.0.1:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ServeError::Bind {
            addr: addr.clone(),
            source,
        })?;

    info!(addr = %listener.local_addr()?, "gateway proxy listening");
    println!("Brújula gateway running at http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    println!("Server shut down gracefully.");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    println!("\nShutting down...");
}
