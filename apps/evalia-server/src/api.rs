//! API handlers for the EvalIA server
//!
//! One upload endpoint drives the whole pipeline:
//! bytes → text → prompt → model reply → parsed observations (or fallback).

use std::time::Instant;

use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use tracing::{info, warn};

use model_gateway::GatewayError;
use review_engine::{build_prompt_with_budget, fallback_observations, parse_reply};
use shared_extract::{extract_text, MediaType};
use shared_types::{AnalysisReport, Observation};

use crate::error::ServerError;
use crate::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "evalia-server",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// One uploaded document, as drained from the multipart form.
pub(crate) struct FileUpload {
    pub filename: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// Handler: POST /api/process-document
pub async fn handle_process_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisReport>, ServerError> {
    let upload = read_file_field(&mut multipart).await?;

    info!(
        filename = %upload.filename,
        content_type = %upload.content_type,
        size = upload.bytes.len(),
        "Processing uploaded document"
    );

    let report = analyze_document(&state, upload).await?;
    Ok(Json(report))
}

/// Drains the form until the uploaded file appears (field named `file`, or
/// any field carrying a filename). Remaining fields are ignored.
async fn read_file_field(multipart: &mut Multipart) -> Result<FileUpload, ServerError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ServerError::InvalidMultipart(err.to_string()))?
    {
        if field.name() != Some("file") && field.file_name().is_none() {
            continue;
        }

        let filename = field.file_name().unwrap_or("documento").to_string();
        let content_type = field.content_type().unwrap_or("").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|err| ServerError::InvalidMultipart(err.to_string()))?;

        return Ok(FileUpload {
            filename,
            content_type,
            bytes,
        });
    }

    Err(ServerError::MissingFile)
}

/// Runs the full analysis pipeline for one upload.
///
/// Extraction problems are client errors; everything downstream of a
/// successful extraction degrades instead of failing (see
/// [`observations_or_fallback`]), so the report status is always
/// `"completed"`.
pub(crate) async fn analyze_document(
    state: &AppState,
    upload: FileUpload,
) -> Result<AnalysisReport, ServerError> {
    let started = Instant::now();

    let media_type = MediaType::from_content_type(&upload.content_type)
        .ok_or_else(|| ServerError::UnsupportedMediaType(upload.content_type.clone()))?;

    // Extraction is CPU-bound on already-uploaded bytes; keep it off the
    // async workers.
    let bytes = upload.bytes.clone();
    let text = tokio::task::spawn_blocking(move || extract_text(&bytes, media_type))
        .await
        .map_err(|err| ServerError::Internal(format!("extraction task failed: {err}")))??;

    if text.trim().is_empty() {
        return Err(ServerError::EmptyDocument);
    }

    let prompt = build_prompt_with_budget(&text, state.prompt_budget);
    let reply = state.gateway.complete(&prompt).await;
    let observations = observations_or_fallback(reply);

    let elapsed = started.elapsed().as_secs_f64();

    Ok(AnalysisReport::completed(
        upload.filename,
        observations,
        Some(elapsed),
        Some(upload.bytes.len() as u64),
    ))
}

/// The degradation policy: a failed gateway call or an unparseable reply
/// still yields a non-empty observation set. Availability over precision.
pub(crate) fn observations_or_fallback(
    reply: Result<String, GatewayError>,
) -> Vec<Observation> {
    match reply {
        Ok(text) => {
            let parsed = parse_reply(&text);
            if parsed.is_empty() {
                info!("Model reply contained no observation blocks, using fallback set");
                fallback_observations()
            } else {
                parsed
            }
        }
        Err(err) => {
            warn!(error = %err, "Model gateway call failed, using fallback set");
            fallback_observations()
        }
    }
}
