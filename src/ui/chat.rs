//! Interactive terminal session.
//!
//! One turn at a time: the input prompt is replaced by a spinner while
//! the remote call is pending, so a second message cannot be sent
//! mid-turn. When the orchestrator signals a confirmation turn, the
//! free-text prompt is swapped for a yes/no affordance whose answer is
//! sent as "Sí"/"No".

use std::time::Duration;

use anyhow::Result;
use console::style;
use dialoguer::{Confirm, Input};
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::Config;
use crate::gateway::{HttpGateway, ModelGateway};
use crate::orchestrator::{Orchestrator, TurnOutcome};
use crate::ui::render::render_markdown;

/// Run a chat session against the configured gateway.
pub async fn run(config: &Config) -> Result<()> {
    let gateway = HttpGateway::new(config.gateway_url.clone(), config.timeout)?;
    let mut orchestrator = Orchestrator::new(gateway);

    splash();

    // Opening turn: the bot speaks first.
    let mut expect_confirmation = drive_turn(&mut orchestrator, "").await;

    loop {
        let message = if expect_confirmation {
            let yes = Confirm::new()
                .with_prompt("¿Confirmás?")
                .default(true)
                .interact()?;
            if yes { "Sí".to_string() } else { "No".to_string() }
        } else {
            Input::<String>::new().with_prompt("Vos").interact_text()?
        };

        if message.trim().is_empty() {
            continue;
        }
        expect_confirmation = drive_turn(&mut orchestrator, message.trim()).await;
    }
}

/// Process one message (looping through resets) and print the result.
/// Returns whether the next turn expects a yes/no answer.
async fn drive_turn<G: ModelGateway>(orchestrator: &mut Orchestrator<G>, message: &str) -> bool {
    let mut message = message.to_string();
    loop {
        let spinner = pending_spinner();
        let outcome = orchestrator.handle_message(&message).await;
        spinner.finish_and_clear();

        match outcome {
            TurnOutcome::Reply {
                display_text,
                expect_confirmation,
            } => {
                println!("\n{}\n", render_markdown(&display_text));
                return expect_confirmation;
            }
            TurnOutcome::Failed { apology } => {
                println!("\n{}\n", style(apology).yellow());
                return false;
            }
            TurnOutcome::Reset {
                notice,
                reopen_delay,
            } => {
                println!("\n{notice}\n");
                tokio::time::sleep(reopen_delay).await;
                // Reopen the conversation with the empty opening turn
                message.clear();
            }
        }
    }
}

fn pending_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} {msg}")
            .expect("progress bar template is a valid static string"),
    );
    spinner.set_message("pensando...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn splash() {
    println!();
    println!(
        "{}",
        style("Explora tu vocación con IA — Expo Carreras 2026").bold()
    );
    println!(
        "{}",
        style("Escribí \"empezar de nuevo\" para reiniciar la conversación.").dim()
    );
    println!();
}
