/// Maximum characters kept for an observation description.
pub const MAX_DESCRIPTION_CHARS: usize = 400;
/// Maximum characters kept for the affected area label.
pub const MAX_AREA_CHARS: usize = 100;
/// Maximum characters kept for a recommendation.
pub const MAX_RECOMMENDATION_CHARS: usize = 300;

/// Substituted when a block carries no usable description text.
pub const DEFAULT_DESCRIPTION: &str = "Observación detectada sin descripción detallada";
/// Substituted when no area/section could be attributed.
pub const DEFAULT_AREA: &str = "Documento general";
/// Substituted when no concrete remediation was given.
pub const DEFAULT_RECOMMENDATION: &str =
    "Revisar y subsanar la sección correspondiente del expediente";

/// Severity of a finding. Wire tokens are the lowercase Spanish words the
/// model is instructed to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Severity {
    #[serde(rename = "alta")]
    High,
    #[serde(rename = "media")]
    Medium,
    #[serde(rename = "baja")]
    Low,
}

impl Severity {
    /// Parses a free token ("alta", " Media ", "BAJA") into a severity.
    /// Anything outside the three-token vocabulary yields `None`; callers
    /// substitute the default instead of dropping the record.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_lowercase().as_str() {
            "alta" => Some(Severity::High),
            "media" => Some(Severity::Medium),
            "baja" => Some(Severity::Low),
            _ => None,
        }
    }

    pub fn as_token(&self) -> &'static str {
        match self {
            Severity::High => "alta",
            Severity::Medium => "media",
            Severity::Low => "baja",
        }
    }
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Medium
    }
}

/// One finding extracted from a document. Constructed only through
/// [`Observation::from_parts`], so all four fields are always populated.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Observation {
    pub description: String,
    pub severity: Severity,
    pub area: String,
    pub recommendation: String,
}

impl Observation {
    /// Builds a fully-populated observation from per-field captures.
    ///
    /// Missing or blank fields get their default, unrecognized severity
    /// tokens become `Medium`, and every text field is trimmed first and
    /// truncated last (counting chars, never bytes).
    pub fn from_parts(
        description: Option<&str>,
        severity_token: Option<&str>,
        area: Option<&str>,
        recommendation: Option<&str>,
    ) -> Self {
        Self {
            description: normalize_field(description, DEFAULT_DESCRIPTION, MAX_DESCRIPTION_CHARS),
            severity: severity_token
                .and_then(Severity::from_token)
                .unwrap_or_default(),
            area: normalize_field(area, DEFAULT_AREA, MAX_AREA_CHARS),
            recommendation: normalize_field(
                recommendation,
                DEFAULT_RECOMMENDATION,
                MAX_RECOMMENDATION_CHARS,
            ),
        }
    }
}

fn normalize_field(value: Option<&str>, default: &str, max_chars: usize) -> String {
    let trimmed = value.map(str::trim).unwrap_or("");
    let chosen = if trimmed.is_empty() { default } else { trimmed };
    truncate_chars(chosen, max_chars)
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Response envelope for one analyzed document.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AnalysisReport {
    pub filename: String,
    pub total_observations: usize,
    pub observations: Vec<Observation>,
    pub status: String,
    pub processing_time: Option<f64>,
    pub file_size: Option<u64>,
}

impl AnalysisReport {
    /// Assembles a terminal `"completed"` report. `total_observations` is
    /// derived from the list and cannot drift from it.
    pub fn completed(
        filename: impl Into<String>,
        observations: Vec<Observation>,
        processing_time: Option<f64>,
        file_size: Option<u64>,
    ) -> Self {
        Self {
            filename: filename.into(),
            total_observations: observations.len(),
            observations,
            status: "completed".to_string(),
            processing_time,
            file_size,
        }
    }
}
