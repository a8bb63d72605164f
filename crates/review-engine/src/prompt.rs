//! Prompt construction for the dossier review request.
//!
//! The model is asked for labeled free-text blocks instead of JSON: a single
//! unescaped quote in a JSON reply makes the whole response unusable, while
//! the labeled scheme degrades field by field in the parser.

/// Character budget for the document excerpt embedded in the prompt.
pub const PROMPT_TEXT_BUDGET_CHARS: usize = 2000;

/// System role message sent alongside the built prompt.
pub const SYSTEM_PROMPT: &str =
    "Eres un experto auditor técnico especializado en el análisis de expedientes.";

/// Builds the analysis prompt with the default excerpt budget.
pub fn build_prompt(text: &str) -> String {
    build_prompt_with_budget(text, PROMPT_TEXT_BUDGET_CHARS)
}

/// Builds the analysis prompt, embedding at most `budget_chars` characters of
/// the sanitized document text. Truncation is a silent prefix cut.
pub fn build_prompt_with_budget(text: &str, budget_chars: usize) -> String {
    let sanitized = sanitize(text);
    let excerpt: String = sanitized.chars().take(budget_chars).collect();

    format!(
        "Analiza el siguiente expediente técnico y enumera todas las observaciones, \
deficiencias, incumplimientos o puntos de mejora que encuentres.\n\
\n\
Usa exactamente este formato para cada observación, numerando de forma consecutiva:\n\
\n\
PROBLEMA 1:\n\
DESCRIPCION: descripción detallada de la observación\n\
GRAVEDAD: alta\n\
AREA: área o sección afectada\n\
RECOMENDACION: acción concreta para subsanarla\n\
\n\
GRAVEDAD debe ser exactamente una de estas palabras: alta, media, baja.\n\
\n\
Criterios de severidad:\n\
- alta: incumplimientos críticos, riesgos de seguridad, violaciones normativas\n\
- media: deficiencias importantes que requieren atención\n\
- baja: mejoras menores o recomendaciones de optimización\n\
\n\
No respondas en JSON ni agregues texto fuera de los bloques PROBLEMA.\n\
\n\
Texto del expediente:\n\
{excerpt}"
    )
}

/// Collapses line breaks to spaces and trims the result. The prompt template
/// relies on line structure, so document text must not introduce its own.
fn sanitize(text: &str) -> String {
    text.replace(['\r', '\n'], " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sanitize_collapses_line_breaks() {
        assert_eq!(sanitize("uno\r\ndos\ntres"), "uno  dos tres");
        assert_eq!(sanitize("  con espacios  "), "con espacios");
    }

    #[test]
    fn prompt_embeds_document_text() {
        let prompt = build_prompt("contenido del expediente");
        assert!(prompt.contains("contenido del expediente"));
        assert!(prompt.contains("PROBLEMA 1:"));
        assert!(prompt.contains("GRAVEDAD"));
    }

    #[test]
    fn prompt_truncates_to_budget() {
        let long = "a".repeat(PROMPT_TEXT_BUDGET_CHARS + 500);
        let prompt = build_prompt(&long);
        let embedded = prompt.split("Texto del expediente:\n").nth(1).unwrap();
        assert_eq!(embedded.chars().count(), PROMPT_TEXT_BUDGET_CHARS);
    }

    #[test]
    fn truncation_is_deterministic() {
        let long = "palabra ".repeat(600);
        assert_eq!(build_prompt(&long), build_prompt(&long));
    }
}
