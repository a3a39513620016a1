//! Per-phase instruction blocks.
//!
//! One template per phase, exhaustively matched, so the registry is a
//! declarative table: given a phase and the state snapshot it returns
//! the Spanish instruction block telling the model what to ask or do
//! next. An unknown phase is unrepresentable; the match is total over
//! [`Phase`].
//!
//! The texts follow the original guidance script, including the hidden
//! markers the interpreter looks for (see [`crate::interpreter`]).

use crate::interpreter::{CLARIFY_MARKER, CONFIRM_MARKER};
use crate::phase::Phase;
use crate::session::SessionState;

// Emoji palette of the script. The persona preamble explains their use
// to the model; the templates below place them explicitly.
pub const EMOJI_WELCOME: &str = "👋";
pub const EMOJI_GUIDE_QUESTION: &str = "🧭";
pub const EMOJI_IDEA_SUGGESTION: &str = "💡";
pub const EMOJI_ACADEMIC_INFO: &str = "🎓";
pub const EMOJI_SUMMARY_CONFIRMATION: &str = "✅";
pub const EMOJI_REFLECTION: &str = "🤔";
pub const EMOJI_PROFESSIONAL_CLARIFICATION: &str = "⚖️";
pub const EMOJI_RESET: &str = "🔄";

/// Literal opening question. Exposed because the end-to-end tests (and
/// the welcome banner) check for it.
pub const WELCOME_QUESTION: &str =
    "¿Qué actividades te entusiasman o te hacen perder la noción del tiempo cuando las hacés?";

/// The clarifying-examples sentence Fase 1.1 may emit. The interpreter
/// also accepts it as a fallback signal when the model drops the marker.
pub const EXAMPLES_TEXT: &str = "Por ejemplo, editar videos, reparar cosas, ayudar a otros, \
     escribir historias, programar juegos, cuidar plantas, diseñar ropa, investigar temas de \
     ciencia, practicar deportes, organizar eventos o aprender idiomas, entre muchas otras.";

/// Instruction block for `phase`, rendered against the current state.
///
/// `user_message` is the message that just arrived; a few phases embed
/// it (the model reacts to the concrete answer, e.g. the chosen area).
pub fn instructions_for(phase: Phase, state: &SessionState, user_message: &str) -> String {
    match phase {
        Phase::Fase0 => format!(
            "**Paso 0.1:** {EMOJI_WELCOME} Hola, soy **Explora tu vocación, tu asistente \
             virtual en la Expo Carreras 2026**.\n\
             Importante: Este asistente fue diseñado con Inteligencia Artificial (IA) para \
             acompañarte en la exploración de tus intereses y posibles caminos formativos. No \
             reemplaza el asesoramiento personalizado de profesionales en orientación \
             vocacional. Puede contener errores o interpretaciones limitadas. Te recomendamos \
             complementar esta experiencia con espacios de reflexión, diálogo y consulta \
             humana.\n\
             **Pregunta:** **{WELCOME_QUESTION}**"
        ),
        Phase::Fase1_1 => format!(
            "El usuario acaba de responder a la pregunta inicial: \"{user_message}\".\n\
             Analiza su respuesta.\n\
             Si la respuesta es muy breve, general, o parece que el usuario necesita más \
             ideas (ej. 'no sé', 'muchas cosas', 'lo normal'), entonces **brinda los \
             ejemplos detallados**: \"{EXAMPLES_TEXT}\" Luego **reformula la pregunta \
             inicial de forma alentadora** para que el usuario pueda expandirse, y **añade \
             al final de tu respuesta el marcador oculto: {CLARIFY_MARKER}**\n\
             Si la respuesta es clara y específica, entonces **continúa el diálogo en forma \
             natural**, sin marcador, y pasa a la siguiente pregunta de la secuencia \
             (Paso 1.2)."
        ),
        Phase::Fase1_2 => format!(
            "**Paso 1.2:** {EMOJI_GUIDE_QUESTION} **¿Qué materias o temas del colegio \
             disfrutás más y por qué? ¿Y alguna que te guste menos? Contame un poco por qué.**"
        ),
        Phase::Fase1_3 => format!(
            "**Paso 1.3:** {EMOJI_GUIDE_QUESTION} **Si pudieras elegir un proyecto o causa \
             en la que trabajar durante un año, ¿cuál sería y qué rol te gustaría tener?**"
        ),
        Phase::Fase1_4 => format!(
            "**Paso 1.4:** {EMOJI_GUIDE_QUESTION} **¿Preferís trabajar en contacto con \
             personas, con ideas, con tecnologías, con la naturaleza o con objetos físicos?**"
        ),
        Phase::Fase2_1 => format!(
            "**Paso 2.1:** {EMOJI_GUIDE_QUESTION} **¿Te imaginás trabajando en un mismo \
             lugar todos los días o preferís cambiar de espacios, moverte, viajar?**"
        ),
        Phase::Fase2_2 => format!(
            "**Paso 2.2:** {EMOJI_GUIDE_QUESTION} **¿Qué te gustaría que las personas \
             valoren de tu trabajo en el futuro?**"
        ),
        Phase::Fase2_3 => format!(
            "**Paso 2.3:** {EMOJI_GUIDE_QUESTION} **¿Ya conocés algunas carreras, \
             tecnicaturas u oficios que te llamen la atención? ¿Querés que te comparta \
             información sobre ellas o sobre cómo seguir explorando?**"
        ),
        Phase::Fase3_1 => format!(
            "**Paso 3.1:** {EMOJI_SUMMARY_CONFIRMATION} Resumen General. Pide validación \
             final del perfil completo.\n\
             Genera un resumen conciso del perfil del estudiante, incluyendo sus actividades \
             de ocio, materias favoritas/menos favoritas, proyecto/causa ideal, preferencia \
             de contacto en el trabajo, estilo de lugar de trabajo y valores en el trabajo.\n\
             **Pregunta:** **¿Es correcto este resumen de tu perfil?**\n\
             **Añade al final de tu respuesta el marcador oculto: {CONFIRM_MARKER}**"
        ),
        Phase::Fase4_1 => format!(
            "**Paso 4.1:** {EMOJI_IDEA_SUGGESTION} Sugiere de 2 a 3 Áreas de Conocimiento y \
             pregunta cuál explorar.\n\
             Primero, si el estudiante aún no lo aclaró, tené en cuenta su preferencia \
             logística: quedarse en La Pampa, estudiar a distancia (online), o mudarse a \
             otra provincia ({logistics}).\n\
             Basado en el perfil completo del estudiante, sugiere 2 o 3 áreas de \
             conocimiento generales (ej. Ciencias de la Salud, Tecnología, Artes y Diseño, \
             Ciencias Sociales, Educación, Ciencias Agrarias).\n\
             **Asegúrate de que estas áreas estén formateadas como una lista con viñetas \
             (ej. * Área 1).**\n\
             **Pregunta al estudiante cuál de esas áreas le gustaría explorar primero.**",
            logistics = state
                .profile
                .get("preferencias_logisticas")
                .map(String::as_str)
                .unwrap_or("")
        ),
        Phase::Fase4_2 => format!(
            "**Paso 4.2:** {EMOJI_ACADEMIC_INFO} Proporciona un listado de carreras \
             específicas del área elegida.\n\
             El usuario ha elegido el área: \"{user_message}\".\n\
             Ahora, lista de 3 a 5 carreras específicas dentro de esa área, siguiendo el \
             orden de prioridad de conocimiento (La Pampa > Nacional Online > Otras \
             Provincias si aplica).\n\
             Para cada carrera, menciona brevemente si es una **tecnicatura**, **carrera de \
             grado** o **profesorado**, y si es **presencial** u **online**.\n\
             **Asegúrate de que la respuesta esté estructurada con viñetas para cada \
             institución, y viñetas anidadas para las carreras debajo de cada institución, \
             incluyendo un enlace al sitio oficial si es posible.**\n\
             **Si el usuario no eligió una de las áreas sugeridas, pídele que elija una de \
             las opciones o que aclare su interés.**"
        ),
        Phase::Fase4_3 => format!(
            "**Paso 4.3:** {EMOJI_REFLECTION} Plantea una pregunta abierta para fomentar la \
             reflexión sobre las opciones.\n\
             Ejemplo: \"De estas carreras que te mencioné, ¿hay alguna que te genere más \
             curiosidad o que te llame la atención? ¿Por qué?\"\n\
             **Asegúrate de que esta pregunta esté en negrita.**"
        ),
        Phase::Fase4_4 => format!(
            "**Paso 4.4:** Ofrece profundizar en la carrera que más le interesó.\n\
             El usuario ha expresado interés en: \"{user_message}\".\n\
             **Pregunta si quiere que profundices en esa carrera (ej. materias principales, \
             duración aproximada, perfil del egresado, dónde se estudia).**"
        ),
        Phase::Fase5_1 => format!(
            "**Paso 5.1:** Pregunta si quiere explorar otra de las áreas sugeridas o si \
             tiene alguna otra duda.\n\
             Recuerda las áreas sugeridas previamente: {areas}.\n\
             **Asegúrate de que esta pregunta esté en negrita.**",
            areas = state.areas_snapshot()
        ),
        Phase::Fase5_2 => concat!(
            "**Paso 5.2:** Para cerrar, ofrece un resumen de las conclusiones y sugiere los ",
            "próximos pasos prácticos (visitar sitios web, buscar testimonios, etc.).\n",
            "Importante: Este asistente fue diseñado con Inteligencia Artificial para ",
            "acompañarte en la exploración de tus intereses y posibles caminos formativos. ",
            "No reemplaza el asesoramiento personalizado de profesionales en orientación ",
            "vocacional. Puede contener errores o interpretaciones limitadas. Te ",
            "recomendamos complementar esta experiencia con espacios de reflexión, diálogo ",
            "y consulta humana.\n",
            "Si el usuario quiere explorar otra área, retomá esa área con el formato del ",
            "Paso 4.2. Si tiene otra duda, responde la duda. Si quiere cerrar, procede con ",
            "el resumen y los próximos pasos."
        )
        .to_string(),
        Phase::Fase5_3 => format!(
            "**Paso 5.3:** {EMOJI_PROFESSIONAL_CLARIFICATION} Aclaración Final Importante.\n\
             Incluye siempre la siguiente aclaración, presentada de forma destacada:\n\
             \"**Aclaración Importante:** Recordá que soy una herramienta de inteligencia \
             artificial diseñada para darte ideas y servir como un primer paso en tu \
             exploración. Este diálogo es un excelente punto de partida, pero no sustituye \
             el valioso criterio, la escucha y el acompañamiento personalizado de un \
             profesional de la orientación vocacional. Te animo a conversar sobre estas \
             ideas con un psicólogo/a o psicopedagogo/a de tu confianza para tomar la \
             decisión final más informada.\"\n\
             Luego, procede al Paso 5.4."
        ),
        Phase::Fase5_4 => format!(
            "**Paso 5.4:** {EMOJI_RESET} Ofrece la opción de reseteo. Presenta la \
             instrucción de forma clara.\n\
             Texto: \"Si en algún momento querés volver a explorar todo desde cero con \
             otras ideas, podés hacerlo. Para eso, simplemente escribí la frase **empezar \
             de nuevo**.\"\n\
             Luego, procede al Paso 5.5."
        ),
        Phase::Fase5_5 => format!(
            "**Paso 5.5:** Ahora sí, despídete con un mensaje alentador y el emoji \
             {EMOJI_WELCOME}.\n\
             Ejemplo: \"¡Fue un gusto conversar con vos! Te deseo mucho éxito en tu búsqueda \
             y en el camino que elijas. ¡Hasta la próxima! {EMOJI_WELCOME}\""
        ),
        // Conversation is over; keep answering follow-ups briefly until
        // the reset command arrives.
        Phase::Fase5_6 => concat!(
            "La conversación guiada terminó. Si el usuario escribe algo, respondé breve y ",
            "amablemente, y recordale que puede escribir **empezar de nuevo** para volver ",
            "a explorar desde cero."
        )
        .to_string(),
    }
}
