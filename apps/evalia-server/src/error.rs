//! Error types for the EvalIA server
//!
//! Only bad input surfaces as a request error. Gateway failures have no
//! variant here on purpose: the orchestrator degrades to fallback
//! observations instead of failing the request.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared_extract::ExtractError;
use thiserror::Error;

/// Server error types
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("tipo de archivo no soportado: {0}")]
    UnsupportedMediaType(String),

    #[error("la petición no incluye ningún archivo")]
    MissingFile,

    #[error("formulario multipart inválido: {0}")]
    InvalidMultipart(String),

    #[error("no se pudo extraer texto del documento: {0}")]
    Extraction(#[from] ExtractError),

    #[error("el documento no contiene texto extraíble")]
    EmptyDocument,

    #[error("error interno: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    code: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ServerError::UnsupportedMediaType(_) => {
                (StatusCode::BAD_REQUEST, "UNSUPPORTED_MEDIA_TYPE")
            }
            ServerError::MissingFile => (StatusCode::BAD_REQUEST, "MISSING_FILE"),
            ServerError::InvalidMultipart(_) => (StatusCode::BAD_REQUEST, "INVALID_MULTIPART"),
            ServerError::Extraction(_) => (StatusCode::BAD_REQUEST, "EXTRACTION_FAILED"),
            ServerError::EmptyDocument => (StatusCode::BAD_REQUEST, "EMPTY_DOCUMENT"),
            ServerError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            success: false,
            error: self.to_string(),
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
