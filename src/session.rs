//! Session state for one conversation.
//!
//! Everything the controller knows about the student lives here: the
//! current phase, the accumulated profile, the areas suggested and
//! selected in the exploration phases, and the full turn history. The
//! orchestrator is the sole owner and mutator; `reset` returns the
//! whole record to its pristine state in one step.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::phase::Phase;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One entry in the conversation history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Mutable record of one conversation, owned by the orchestrator.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Stable id for log correlation, survives reset.
    pub id: Uuid,
    pub phase: Phase,
    /// Last raw answer per profile field. BTreeMap keeps the snapshot
    /// rendering deterministic.
    pub profile: BTreeMap<String, String>,
    /// Knowledge areas proposed in Fase 4.1, kept for later recap.
    pub suggested_areas: Vec<String>,
    /// Area the student picked from `suggested_areas`; empty until then.
    pub selected_area: String,
    pub history: Vec<Turn>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            phase: Phase::default(),
            profile: BTreeMap::new(),
            suggested_areas: Vec::new(),
            selected_area: String::new(),
            history: Vec::new(),
        }
    }

    /// Overwrite or create a profile entry. Answers are stored verbatim.
    pub fn set_profile_field(&mut self, field: &str, value: &str) {
        self.profile.insert(field.to_string(), value.to_string());
    }

    /// Render the profile as one line per field for prompt embedding.
    /// An empty profile renders as an empty string, never an error.
    pub fn profile_snapshot(&self) -> String {
        self.profile
            .iter()
            .map(|(field, answer)| format!("- {field}: {answer}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render the suggested areas as a comma-separated list.
    pub fn areas_snapshot(&self) -> String {
        self.suggested_areas.join(", ")
    }

    /// Clear everything back to the opening phase. The session id is
    /// kept so a reset still correlates in the logs.
    pub fn reset(&mut self) {
        self.phase = Phase::default();
        self.profile.clear();
        self.suggested_areas.clear();
        self.selected_area.clear();
        self.history.clear();
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
