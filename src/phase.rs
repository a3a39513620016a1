//! Phase identifiers for the guidance script.
//!
//! The conversation is a fixed script of named phases. Each phase knows
//! its position in the script and, when it collects an answer, the
//! profile field that answer is stored under. The instruction text for
//! each phase lives in [`crate::registry`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named step in the guidance script.
///
/// Variant names follow the script's own numbering ("Fase 1.1" etc.) so
/// logs and the prompt context block read the same as the script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Welcome, disclaimer and the opening question.
    Fase0,
    /// Evaluates the opening answer; may offer clarifying examples.
    Fase1_1,
    /// Favourite and least favourite school subjects.
    Fase1_2,
    /// Dream project or cause.
    Fase1_3,
    /// Preferred kind of contact (people, ideas, technology, nature, objects).
    Fase1_4,
    /// Fixed workplace vs. moving around.
    Fase2_1,
    /// What the student wants valued about their work.
    Fase2_2,
    /// Careers the student already has in mind.
    Fase2_3,
    /// Profile summary with yes/no confirmation.
    Fase3_1,
    /// Suggests 2-3 knowledge areas, plus the logistical filter.
    Fase4_1,
    /// Lists concrete careers inside the chosen area.
    Fase4_2,
    /// Open reflection question about the listed careers.
    Fase4_3,
    /// Offers to go deeper into the career of interest.
    Fase4_4,
    /// Asks whether to explore another area or wrap up.
    Fase5_1,
    /// Closing summary and practical next steps.
    Fase5_2,
    /// Final professional-guidance disclaimer.
    Fase5_3,
    /// Presents the reset instruction.
    Fase5_4,
    /// Farewell.
    Fase5_5,
    /// Steady state; only the reset command leaves it.
    Fase5_6,
}

impl Phase {
    /// Every phase, in script order.
    pub const ALL: [Phase; 19] = [
        Phase::Fase0,
        Phase::Fase1_1,
        Phase::Fase1_2,
        Phase::Fase1_3,
        Phase::Fase1_4,
        Phase::Fase2_1,
        Phase::Fase2_2,
        Phase::Fase2_3,
        Phase::Fase3_1,
        Phase::Fase4_1,
        Phase::Fase4_2,
        Phase::Fase4_3,
        Phase::Fase4_4,
        Phase::Fase5_1,
        Phase::Fase5_2,
        Phase::Fase5_3,
        Phase::Fase5_4,
        Phase::Fase5_5,
        Phase::Fase5_6,
    ];

    /// Profile field the current turn's user message is stored under,
    /// if this phase collects an answer.
    ///
    /// `Fase4_2` is the one exception: its answer is the selected area
    /// and goes to `SessionState::selected_area`, not the profile.
    pub fn profile_field(self) -> Option<&'static str> {
        match self {
            Phase::Fase1_1 => Some("actividades_ocio"),
            Phase::Fase1_2 => Some("materias_gusto"),
            Phase::Fase1_3 => Some("proyecto_causa"),
            Phase::Fase1_4 => Some("preferencia_contacto"),
            Phase::Fase2_1 => Some("estilo_lugar_trabajo"),
            Phase::Fase2_2 => Some("valores_trabajo"),
            Phase::Fase2_3 => Some("carreras_preexistentes"),
            Phase::Fase3_1 => Some("confirmacion_perfil"),
            Phase::Fase4_1 => Some("preferencias_logisticas"),
            Phase::Fase4_3 => Some("carreras_sugeridas_area"),
            Phase::Fase4_4 => Some("carrera_interes_fase4"),
            Phase::Fase5_1 => Some("profundizacion_carrera"),
            Phase::Fase5_2 => Some("exploracion_adicional"),
            Phase::Fase5_3 => Some("cierre_confirmado"),
            Phase::Fase0
            | Phase::Fase4_2
            | Phase::Fase5_4
            | Phase::Fase5_5
            | Phase::Fase5_6 => None,
        }
    }

    /// Whether this phase's answer is the area selection.
    pub fn selects_area(self) -> bool {
        self == Phase::Fase4_2
    }

    /// Whether this is the absorbing end-of-script phase.
    pub fn is_steady(self) -> bool {
        self == Phase::Fase5_6
    }

    /// Script-facing name, e.g. `"Fase 1.1"`.
    pub fn name(self) -> &'static str {
        match self {
            Phase::Fase0 => "Fase 0",
            Phase::Fase1_1 => "Fase 1.1",
            Phase::Fase1_2 => "Fase 1.2",
            Phase::Fase1_3 => "Fase 1.3",
            Phase::Fase1_4 => "Fase 1.4",
            Phase::Fase2_1 => "Fase 2.1",
            Phase::Fase2_2 => "Fase 2.2",
            Phase::Fase2_3 => "Fase 2.3",
            Phase::Fase3_1 => "Fase 3.1",
            Phase::Fase4_1 => "Fase 4.1",
            Phase::Fase4_2 => "Fase 4.2",
            Phase::Fase4_3 => "Fase 4.3",
            Phase::Fase4_4 => "Fase 4.4",
            Phase::Fase5_1 => "Fase 5.1",
            Phase::Fase5_2 => "Fase 5.2",
            Phase::Fase5_3 => "Fase 5.3",
            Phase::Fase5_4 => "Fase 5.4",
            Phase::Fase5_5 => "Fase 5.5",
            Phase::Fase5_6 => "Fase 5.6",
        }
    }
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Fase0
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Phase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Phase::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| format!("unknown phase: {s}"))
    }
}
