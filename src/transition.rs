//! The phase-transition function.
//!
//! A pure function from (current phase, user message, interpreted
//! reply) to the next phase. Most edges are linear; two are
//! conditional:
//! - Fase 1.1 self-loops while the model keeps offering clarifying
//!   examples (signalled by the interpreter, not by substring-matching
//!   the reply).
//! - Fase 3.1 advances only once the user affirms the profile summary.
//!
//! Fase 5.6 is absorbing; only the out-of-band reset command (handled
//! by the orchestrator) leaves it.

use crate::interpreter::Interpreted;
use crate::phase::Phase;

/// Tokens that count as an affirmative answer to the summary question.
const AFFIRMATIVE_TOKENS: [&str; 3] = ["sí", "si", "correcto"];

/// Compute the phase for the next turn.
pub fn next_phase(current: Phase, user_message: &str, reply: &Interpreted) -> Phase {
    match current {
        Phase::Fase0 => Phase::Fase1_1,
        Phase::Fase1_1 => {
            if reply.gave_examples {
                // The model re-asked the opening question; the next
                // answer is still for Fase 1.1.
                Phase::Fase1_1
            } else {
                Phase::Fase1_2
            }
        }
        Phase::Fase1_2 => Phase::Fase1_3,
        Phase::Fase1_3 => Phase::Fase1_4,
        Phase::Fase1_4 => Phase::Fase2_1,
        Phase::Fase2_1 => Phase::Fase2_2,
        Phase::Fase2_2 => Phase::Fase2_3,
        Phase::Fase2_3 => Phase::Fase3_1,
        Phase::Fase3_1 => {
            if is_affirmative(user_message) {
                Phase::Fase4_1
            } else {
                Phase::Fase3_1
            }
        }
        Phase::Fase4_1 => Phase::Fase4_2,
        Phase::Fase4_2 => Phase::Fase4_3,
        Phase::Fase4_3 => Phase::Fase4_4,
        Phase::Fase4_4 => Phase::Fase5_1,
        Phase::Fase5_1 => Phase::Fase5_2,
        Phase::Fase5_2 => Phase::Fase5_3,
        Phase::Fase5_3 => Phase::Fase5_4,
        Phase::Fase5_4 => Phase::Fase5_5,
        Phase::Fase5_5 => Phase::Fase5_6,
        Phase::Fase5_6 => Phase::Fase5_6,
    }
}

/// Whole-word, case-insensitive match of the affirmative tokens, so
/// "imposible" does not count as "si".
fn is_affirmative(message: &str) -> bool {
    message
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| AFFIRMATIVE_TOKENS.contains(&word))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_reply() -> Interpreted {
        Interpreted {
            display_text: "una respuesta cualquiera".to_string(),
            wants_confirmation: false,
            gave_examples: false,
        }
    }

    fn examples_reply() -> Interpreted {
        Interpreted {
            gave_examples: true,
            ..plain_reply()
        }
    }

    #[test]
    fn test_linear_phases_have_one_fixed_successor() {
        let fixed = [
            (Phase::Fase0, Phase::Fase1_1),
            (Phase::Fase1_2, Phase::Fase1_3),
            (Phase::Fase1_3, Phase::Fase1_4),
            (Phase::Fase1_4, Phase::Fase2_1),
            (Phase::Fase2_1, Phase::Fase2_2),
            (Phase::Fase2_2, Phase::Fase2_3),
            (Phase::Fase2_3, Phase::Fase3_1),
            (Phase::Fase4_1, Phase::Fase4_2),
            (Phase::Fase4_2, Phase::Fase4_3),
            (Phase::Fase4_3, Phase::Fase4_4),
            (Phase::Fase4_4, Phase::Fase5_1),
            (Phase::Fase5_1, Phase::Fase5_2),
            (Phase::Fase5_2, Phase::Fase5_3),
            (Phase::Fase5_3, Phase::Fase5_4),
            (Phase::Fase5_4, Phase::Fase5_5),
            (Phase::Fase5_5, Phase::Fase5_6),
        ];
        // Successor must not depend on message content or reply signals
        for (from, to) in fixed {
            assert_eq!(next_phase(from, "", &plain_reply()), to);
            assert_eq!(next_phase(from, "sí", &examples_reply()), to);
            assert_eq!(next_phase(from, "cualquier cosa", &plain_reply()), to);
        }
    }

    #[test]
    fn test_fase_1_1_self_loops_on_examples_signal() {
        assert_eq!(
            next_phase(Phase::Fase1_1, "no sé", &examples_reply()),
            Phase::Fase1_1
        );
        assert_eq!(
            next_phase(Phase::Fase1_1, "me gusta programar", &plain_reply()),
            Phase::Fase1_2
        );
    }

    #[test]
    fn test_fase_3_1_advances_on_affirmative() {
        assert_eq!(
            next_phase(Phase::Fase3_1, "sí, es correcto", &plain_reply()),
            Phase::Fase4_1
        );
        assert_eq!(
            next_phase(Phase::Fase3_1, "Si", &plain_reply()),
            Phase::Fase4_1
        );
        assert_eq!(
            next_phase(Phase::Fase3_1, "CORRECTO", &plain_reply()),
            Phase::Fase4_1
        );
    }

    #[test]
    fn test_fase_3_1_self_loops_otherwise() {
        assert_eq!(
            next_phase(Phase::Fase3_1, "no", &plain_reply()),
            Phase::Fase3_1
        );
        assert_eq!(
            next_phase(Phase::Fase3_1, "faltó mi materia favorita", &plain_reply()),
            Phase::Fase3_1
        );
    }

    #[test]
    fn test_affirmative_requires_whole_word() {
        assert!(!is_affirmative("imposible"));
        assert!(!is_affirmative("siempre quise otra cosa"));
        assert!(is_affirmative("sí!"));
        assert!(is_affirmative("es correcto."));
    }

    #[test]
    fn test_fase_5_6_is_absorbing() {
        assert_eq!(
            next_phase(Phase::Fase5_6, "hola?", &plain_reply()),
            Phase::Fase5_6
        );
        assert_eq!(
            next_phase(Phase::Fase5_6, "sí", &examples_reply()),
            Phase::Fase5_6
        );
    }

    #[test]
    fn test_function_is_total_over_the_enum() {
        for phase in Phase::ALL {
            // Must not panic for any phase
            let _ = next_phase(phase, "x", &plain_reply());
        }
    }
}
