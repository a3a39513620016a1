//! Turn loop for one conversation.
//!
//! The orchestrator owns the session state and drives one turn at a
//! time: append the user message, stage the phase-owned profile write,
//! compose the prompt, call the gateway, interpret the reply, commit,
//! advance the phase. Turn mutations are staged on a copy and only
//! committed when generation succeeds, so a failed call leaves phase
//! and profile exactly as they were.
//!
//! `handle_message` takes `&mut self`: a second in-flight turn for the
//! same session is unrepresentable.

use std::time::Duration;

use tracing::{info, warn};

use crate::gateway::{self, ModelGateway};
use crate::interpreter;
use crate::phase::Phase;
use crate::prompt;
use crate::session::{SessionState, Turn};
use crate::transition;

/// Case-insensitive user messages that restart the conversation.
const RESET_COMMANDS: [&str; 2] = ["empezar de nuevo", "reset"];

/// Notice shown while the conversation restarts.
pub const RESET_NOTICE: &str = "🔄 Reiniciando la conversación...";

/// Pause between the reset notice and the reopened conversation. A
/// directive for the presentation layer, not a timer inside the core.
pub const REOPEN_DELAY: Duration = Duration::from_millis(1000);

/// What the presentation layer should do after a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Show the reply; when `expect_confirmation` is set, the next turn
    /// presents a yes/no affordance instead of free text.
    Reply {
        display_text: String,
        expect_confirmation: bool,
    },
    /// Session was cleared. Show `notice`, wait `reopen_delay`, then
    /// re-issue the opening turn with an empty message.
    Reset {
        notice: &'static str,
        reopen_delay: Duration,
    },
    /// Generation failed; show the apology. State kept as before the
    /// turn except for the appended user message.
    Failed { apology: String },
}

/// Whether `message` is the out-of-band reset command.
pub fn is_reset_command(message: &str) -> bool {
    let normalized = message.trim().to_lowercase();
    RESET_COMMANDS.contains(&normalized.as_str())
}

/// Drives the conversation against a [`ModelGateway`]. Sole owner and
/// mutator of the session state.
pub struct Orchestrator<G> {
    gateway: G,
    state: SessionState,
}

impl<G: ModelGateway> Orchestrator<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            state: SessionState::new(),
        }
    }

    /// Read-only view for display and tests.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Process one user message (empty for the opening turn) and return
    /// the display directive for the presentation layer.
    pub async fn handle_message(&mut self, user_message: &str) -> TurnOutcome {
        if is_reset_command(user_message) {
            info!(session = %self.state.id, "reset command received");
            self.state.reset();
            return TurnOutcome::Reset {
                notice: RESET_NOTICE,
                reopen_delay: REOPEN_DELAY,
            };
        }

        // Stage this turn's mutations; committed only on success.
        let mut staged = self.state.clone();
        staged.history.push(Turn::user(user_message));
        if !user_message.trim().is_empty() {
            if let Some(field) = staged.phase.profile_field() {
                staged.set_profile_field(field, user_message);
            } else if staged.phase.selects_area() {
                staged.selected_area = user_message.to_string();
            }
        }

        let composed = prompt::compose(&staged, user_message);
        let wire = gateway::to_wire_history(&staged.history, &composed);

        let raw = match self.gateway.send(&wire).await {
            Ok(raw) => raw,
            Err(err) => {
                warn!(session = %self.state.id, phase = %self.state.phase, error = %err,
                      "generation failed");
                // Keep the user's message; phase and profile stay put.
                self.state.history.push(Turn::user(user_message));
                return TurnOutcome::Failed {
                    apology: err.apology().to_string(),
                };
            }
        };

        let reply = interpreter::interpret(&raw);
        staged.history.push(Turn::bot(reply.display_text.clone()));

        // The area-suggestion reply is the one place suggested_areas is
        // captured; later phases only read it back.
        if staged.phase == Phase::Fase4_1 {
            let areas = interpreter::extract_suggested_areas(&reply.display_text);
            if !areas.is_empty() {
                staged.suggested_areas = areas;
            }
        }

        let from = staged.phase;
        staged.phase = transition::next_phase(from, user_message, &reply);
        info!(session = %staged.id, from = %from, to = %staged.phase,
              confirmation = reply.wants_confirmation, "turn complete");

        self.state = staged;
        TurnOutcome::Reply {
            display_text: reply.display_text,
            expect_confirmation: reply.wants_confirmation,
        }
    }
}
