//! Control-marker scanning on model replies.
//!
//! The model is instructed to append reserved markers when the next
//! turn needs a structured affordance instead of free text. The
//! interpreter strips those markers from the display text and turns
//! them into signals the orchestrator consumes. Markdown in the reply
//! passes through untouched; rendering belongs to the presentation
//! layer.

use crate::registry::EXAMPLES_TEXT;

/// Appended by the model when the next turn expects a yes/no answer.
pub const CONFIRM_MARKER: &str = "---CONFIRMAR_SI_NO---";

/// Appended by the model when it chose to give clarifying examples and
/// re-ask the opening question instead of moving on.
pub const CLARIFY_MARKER: &str = "---DAR_EJEMPLOS---";

/// A model reply after marker extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpreted {
    /// Reply text with all markers removed and whitespace trimmed.
    pub display_text: String,
    /// The next turn should present a yes/no affordance.
    pub wants_confirmation: bool,
    /// The model gave clarifying examples; the script stays in Fase 1.1.
    pub gave_examples: bool,
}

/// Scan `raw` for control markers and strip them.
///
/// Markers usually arrive at the end of the reply but are accepted
/// anywhere, with any surrounding whitespace. The examples signal also
/// fires on the literal examples sentence: models drop hidden markers
/// often enough that the textual fallback is worth keeping.
pub fn interpret(raw: &str) -> Interpreted {
    let wants_confirmation = raw.contains(CONFIRM_MARKER);
    let gave_examples = raw.contains(CLARIFY_MARKER) || contains_examples_text(raw);

    let mut display_text = raw.to_string();
    if wants_confirmation {
        display_text = display_text.replace(CONFIRM_MARKER, "");
    }
    if display_text.contains(CLARIFY_MARKER) {
        display_text = display_text.replace(CLARIFY_MARKER, "");
    }

    Interpreted {
        display_text: display_text.trim().to_string(),
        wants_confirmation,
        gave_examples,
    }
}

/// Fallback heuristic from the original script: the examples sentence
/// always opens with this fragment.
fn contains_examples_text(raw: &str) -> bool {
    let fragment = &EXAMPLES_TEXT[..EXAMPLES_TEXT
        .char_indices()
        .nth(30)
        .map(|(i, _)| i)
        .unwrap_or(EXAMPLES_TEXT.len())];
    raw.contains(fragment)
}

/// Pull top-level bullet items out of an area-suggestion reply.
///
/// Lines like `* Tecnología` or `- **Ciencias de la Salud**: ...` yield
/// the item text with emphasis and any trailing description stripped.
/// Indented (nested) bullets are ignored.
pub fn extract_suggested_areas(display_text: &str) -> Vec<String> {
    display_text
        .lines()
        .filter_map(|line| {
            let rest = line.strip_prefix("* ").or_else(|| line.strip_prefix("- "))?;
            let item = rest.split(':').next().unwrap_or(rest);
            let item = item.replace("**", "");
            let item = item.trim();
            if item.is_empty() {
                None
            } else {
                Some(item.to_string())
            }
        })
        .collect()
}
