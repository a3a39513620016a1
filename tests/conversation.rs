//! End-to-end conversation tests: a scripted walk through every phase,
//! and the chat client talking to the real proxy over HTTP.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{Json, Router, routing::post};
use serde_json::json;
use tokio::net::TcpListener;

use brujula::errors::GatewayError;
use brujula::gateway::server::{AppState, build_router};
use brujula::gateway::{ChatMessage, HttpGateway, ModelGateway};
use brujula::orchestrator::{Orchestrator, TurnOutcome};
use brujula::phase::Phase;

/// Pops scripted replies front-to-back.
struct ScriptedGateway {
    replies: Mutex<Vec<Result<String, GatewayError>>>,
}

impl ScriptedGateway {
    fn new(replies: Vec<Result<String, GatewayError>>) -> Self {
        Self {
            replies: Mutex::new(replies),
        }
    }
}

#[async_trait]
impl ModelGateway for ScriptedGateway {
    async fn send(&self, _chat_history: &[ChatMessage]) -> Result<String, GatewayError> {
        self.replies.lock().unwrap().remove(0)
    }
}

fn reply(text: &str) -> Result<String, GatewayError> {
    Ok(text.to_string())
}

#[tokio::test]
async fn test_full_guided_walk_reaches_the_final_phase() {
    // One scripted reply per turn: the greeting, one per question, the
    // profile summary with its confirmation marker, the area menu with
    // its bullets, and the closing stretch.
    let gateway = ScriptedGateway::new(vec![
        reply("👋 ¡Hola! **¿Qué actividades te entusiasman?**"),
        reply("**¿Qué materias disfrutás más?**"),
        reply("**¿Qué problema te gustaría ayudar a resolver?**"),
        reply("**¿Preferís trabajar con personas, datos u objetos?**"),
        reply("**¿Dónde te imaginás trabajando?**"),
        reply("**¿Qué valorás más en un trabajo?**"),
        reply("**¿Hay carreras que ya tengas en mente?**"),
        reply("✅ Tu perfil hasta ahora... **¿Es correcto?** ---CONFIRMAR_SI_NO---"),
        reply(
            "💡 Con tu perfil, te sugiero estas áreas:\n\
             * **Tecnología**\n\
             * **Ciencias de la Salud**\n\
             * **Diseño**\n\
             **¿Cuál te gustaría explorar primero?**",
        ),
        reply("* UNLPam:\n    * Ingeniería en Sistemas\n**¿Alguna te llama la atención?**"),
        reply("🎓 Ingeniería en Sistemas dura 5 años... **¿Querés saber más?**"),
        reply("**¿Te gustaría explorar otra área o profundizar?**"),
        reply("📋 En resumen... **¿Te resultó útil la charla?**"),
        reply("Me alegra haberte acompañado. **¿Algo más?**"),
        reply("1. Visitar el sitio de la UNLPam\n2. Buscar testimonios"),
        reply("✨ ¡Mucha suerte en Expo Carreras!"),
        reply("Gracias por participar. 👋"),
        reply("La conversación ya terminó, ¡pero fue un gusto!"),
        reply("¡Fue un gusto acompañarte! 👋"),
    ]);
    let mut orch = Orchestrator::new(gateway);

    // Opening turn: the bot speaks first.
    orch.handle_message("").await;
    assert_eq!(orch.state().phase, Phase::Fase1_1);

    let answers: &[(&str, Phase)] = &[
        ("me gusta dibujar y editar videos", Phase::Fase1_2),
        ("biología y matemática", Phase::Fase1_3),
        ("la contaminación de los ríos", Phase::Fase1_4),
        ("con personas", Phase::Fase2_1),
        ("en un hospital o laboratorio", Phase::Fase2_2),
        ("ayudar a los demás", Phase::Fase2_3),
        ("medicina, tal vez enfermería", Phase::Fase3_1),
        ("sí, es correcto", Phase::Fase4_1),
        ("prefiero quedarme en La Pampa", Phase::Fase4_2),
        ("Ciencias de la Salud", Phase::Fase4_3),
        ("Ingeniería en Sistemas", Phase::Fase4_4),
        ("contame más", Phase::Fase5_1),
        ("profundizar", Phase::Fase5_2),
        ("sí, me sirvió mucho", Phase::Fase5_3),
        ("no, eso es todo", Phase::Fase5_4),
        ("gracias", Phase::Fase5_5),
        ("chau", Phase::Fase5_6),
    ];
    for (message, expected) in answers {
        let outcome = orch.handle_message(message).await;
        assert!(
            matches!(outcome, TurnOutcome::Reply { .. }),
            "turn {message:?} did not produce a reply"
        );
        assert_eq!(orch.state().phase, *expected, "after {message:?}");
    }

    // Final phase is absorbing.
    orch.handle_message("¿seguimos?").await;
    assert_eq!(orch.state().phase, Phase::Fase5_6);

    // Each phase wrote only its own field.
    let profile = &orch.state().profile;
    assert_eq!(
        profile.get("actividades_ocio").map(String::as_str),
        Some("me gusta dibujar y editar videos")
    );
    assert_eq!(
        profile.get("materias_gusto").map(String::as_str),
        Some("biología y matemática")
    );
    assert_eq!(
        profile.get("carreras_preexistentes").map(String::as_str),
        Some("medicina, tal vez enfermería")
    );
    assert_eq!(
        profile.get("preferencias_logisticas").map(String::as_str),
        Some("prefiero quedarme en La Pampa")
    );

    // The area menu was captured and the pick recorded separately.
    assert_eq!(
        orch.state().suggested_areas,
        vec!["Tecnología", "Ciencias de la Salud", "Diseño"]
    );
    assert_eq!(orch.state().selected_area, "Ciencias de la Salud");

    // Alternating user/bot turns: opening + 18 full turns.
    assert_eq!(orch.state().history.len(), 38);
}

#[tokio::test]
async fn test_profile_rejection_keeps_the_confirmation_phase() {
    // Walk the linear stretch up to the profile summary, then exercise
    // the conditional edge: "No" keeps the phase, "sí" advances.
    let gateway = ScriptedGateway::new(vec![
        reply("saludo"),
        reply("p1"),
        reply("p2"),
        reply("p3"),
        reply("p4"),
        reply("p5"),
        reply("p6"),
        reply("✅ ¿Es correcto? ---CONFIRMAR_SI_NO---"),
        reply("Contame qué corregir. ¿Así está bien? ---CONFIRMAR_SI_NO---"),
        reply("💡 Áreas sugeridas..."),
    ]);
    let mut orch = Orchestrator::new(gateway);
    orch.handle_message("").await;
    for answer in ["a", "b", "c", "d", "e", "f", "g"] {
        orch.handle_message(answer).await;
    }
    assert_eq!(orch.state().phase, Phase::Fase3_1);

    orch.handle_message("No, el resumen está mal").await;
    assert_eq!(orch.state().phase, Phase::Fase3_1);

    orch.handle_message("sí").await;
    assert_eq!(orch.state().phase, Phase::Fase4_1);
}

/// Stand-in for the Gemini endpoint behind the proxy.
async fn spawn_vendor_stub(text: &str) -> String {
    let reply = json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] }
        }]
    });
    let router = Router::new().route(
        "/generate",
        post(move || {
            let reply = reply.clone();
            async move { Json(reply) }
        }),
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/generate")
}

/// Serve the real proxy router on an ephemeral port.
async fn spawn_proxy(vendor_url: String) -> String {
    let state = Arc::new(AppState::new(Some("test-key".to_string()), vendor_url));
    let app = build_router(state);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api/gemini")
}

#[tokio::test]
async fn test_chat_client_through_the_real_proxy() {
    let vendor_url = spawn_vendor_stub("👋 ¡Hola! **¿Qué actividades te entusiasman?**").await;
    let gateway_url = spawn_proxy(vendor_url).await;

    let gateway = HttpGateway::new(gateway_url, Duration::from_secs(5)).unwrap();
    let mut orch = Orchestrator::new(gateway);

    let outcome = orch.handle_message("").await;
    match outcome {
        TurnOutcome::Reply {
            display_text,
            expect_confirmation,
        } => {
            assert!(display_text.contains("¡Hola!"));
            assert!(!expect_confirmation);
        }
        other => panic!("expected Reply, got {other:?}"),
    }
    assert_eq!(orch.state().phase, Phase::Fase1_1);
}

#[tokio::test]
async fn test_proxy_error_surfaces_as_apology_and_keeps_state() {
    // Proxy with no credential: every request gets the generic 500.
    let state = Arc::new(AppState::new(None, "http://127.0.0.1:1/unused".to_string()));
    let app = build_router(state);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let gateway = HttpGateway::new(
        format!("http://{addr}/api/gemini"),
        Duration::from_secs(5),
    )
    .unwrap();
    let mut orch = Orchestrator::new(gateway);

    let outcome = orch.handle_message("hola").await;
    match outcome {
        TurnOutcome::Failed { apology } => {
            assert!(apology.starts_with("Disculpá"));
            // The vendor credential name never leaks through the boundary
            assert!(!apology.contains("GEMINI_API_KEY"));
        }
        other => panic!("expected Failed, got {other:?}"),
    }
    assert_eq!(orch.state().phase, Phase::Fase0);
    assert!(orch.state().profile.is_empty());
}
