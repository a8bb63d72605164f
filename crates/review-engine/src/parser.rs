//! Parsing of the model's free-text reply into validated observations.
//!
//! The reply protocol is loose by design: repeated `PROBLEMA n:` blocks with
//! four labeled fields. Extraction is pattern-based, per field and per
//! segment, so one malformed block or one missing label never discards the
//! rest of the batch.

use lazy_static::lazy_static;
use regex::Regex;
use shared_types::Observation;

lazy_static! {
    /// Sequential block marker. Tolerates case drift, the unaccented or
    /// truncated `PROBLEM` spelling, and loose spacing around the number.
    static ref MARKER: Regex = Regex::new(r"(?i)PROBLEMA?\s*\d+\s*:").unwrap();

    /// Field labels. Each capture runs up to the next known label or the end
    /// of the segment, so label order and absence are both tolerated.
    static ref DESCRIPTION: Regex = Regex::new(
        r"(?is)DESCRIPCI[OÓ]N\s*:\s*(.*?)(?:GRAVEDAD\s*:|[AÁ]REA\s*:|RECOMENDACI[OÓ]N\s*:|$)"
    )
    .unwrap();
    static ref SEVERITY: Regex = Regex::new(r"(?i)GRAVEDAD\s*:\s*(\p{L}+)").unwrap();
    static ref AREA: Regex =
        Regex::new(r"(?is)[AÁ]REA\s*:\s*(.*?)(?:RECOMENDACI[OÓ]N\s*:|$)").unwrap();
    static ref RECOMMENDATION: Regex =
        Regex::new(r"(?is)RECOMENDACI[OÓ]N\s*:\s*(.*)$").unwrap();
}

/// Where a record field's final value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSource {
    /// Captured from the reply and accepted as-is (after trim/truncate).
    Extracted,
    /// Missing, blank, or outside the accepted vocabulary; the default was
    /// substituted.
    Defaulted,
}

/// Per-field provenance for one parsed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSources {
    pub description: FieldSource,
    pub severity: FieldSource,
    pub area: FieldSource,
    pub recommendation: FieldSource,
}

/// A normalized observation plus the provenance of each field, so tests can
/// assert *why* a value is what it is instead of inspecting suppressed
/// errors.
#[derive(Debug, Clone)]
pub struct ParsedRecord {
    pub observation: Observation,
    pub sources: FieldSources,
}

/// Parses a model reply into observations. Never fails: anything unusable
/// yields an empty vector and the caller decides whether to fall back.
pub fn parse_reply(reply: &str) -> Vec<Observation> {
    parse_records(reply)
        .into_iter()
        .map(|record| record.observation)
        .collect()
}

/// Same as [`parse_reply`] but keeps per-field provenance.
pub fn parse_records(reply: &str) -> Vec<ParsedRecord> {
    segments(reply)
        .into_iter()
        .filter_map(build_record)
        .collect()
}

/// Splits the reply at each block marker. The segment is the text between the
/// end of one marker and the start of the next (or end of reply). Zero
/// markers means zero segments, not an error.
fn segments(reply: &str) -> Vec<&str> {
    let marks: Vec<_> = MARKER.find_iter(reply).collect();
    marks
        .iter()
        .enumerate()
        .map(|(i, mark)| {
            let start = mark.end();
            let end = marks.get(i + 1).map(|next| next.start()).unwrap_or(reply.len());
            &reply[start..end]
        })
        .collect()
}

/// Builds one record from one segment. This is the per-segment isolation
/// boundary: a segment that cannot produce a record is skipped, the rest of
/// the batch survives. Field extraction itself is total, so a segment with no
/// recognizable label still yields a fully-defaulted record.
fn build_record(segment: &str) -> Option<ParsedRecord> {
    let description = capture(&DESCRIPTION, segment);
    let severity_token = capture(&SEVERITY, segment);
    let area = capture(&AREA, segment);
    let recommendation = capture(&RECOMMENDATION, segment);

    let observation = Observation::from_parts(
        description.as_deref(),
        severity_token.as_deref(),
        area.as_deref(),
        recommendation.as_deref(),
    );

    let sources = FieldSources {
        description: text_source(description.as_deref()),
        severity: severity_source(severity_token.as_deref()),
        area: text_source(area.as_deref()),
        recommendation: text_source(recommendation.as_deref()),
    };

    Some(ParsedRecord {
        observation,
        sources,
    })
}

fn capture(re: &Regex, segment: &str) -> Option<String> {
    re.captures(segment)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn text_source(captured: Option<&str>) -> FieldSource {
    match captured.map(str::trim) {
        Some(text) if !text.is_empty() => FieldSource::Extracted,
        _ => FieldSource::Defaulted,
    }
}

fn severity_source(token: Option<&str>) -> FieldSource {
    match token.and_then(shared_types::Severity::from_token) {
        Some(_) => FieldSource::Extracted,
        None => FieldSource::Defaulted,
    }
}
