//! Tests for the EvalIA server pipeline
//!
//! Scenario tests drive `analyze_document` end to end with scripted
//! gateways (no network); property tests fuzz the degradation policy.

mod support {
    use std::io::{Cursor, Write};

    use async_trait::async_trait;
    use model_gateway::{GatewayError, ModelGateway};
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    pub const DOCX_CONTENT_TYPE: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

    /// Gateway that always answers with a fixed reply.
    pub struct ScriptedGateway(pub String);

    #[async_trait]
    impl ModelGateway for ScriptedGateway {
        async fn complete(&self, _prompt: &str) -> Result<String, GatewayError> {
            Ok(self.0.clone())
        }
    }

    /// Gateway that always fails, simulating provider or network trouble.
    pub struct FailingGateway;

    #[async_trait]
    impl ModelGateway for FailingGateway {
        async fn complete(&self, _prompt: &str) -> Result<String, GatewayError> {
            Err(GatewayError::Status {
                status: 503,
                body: "service unavailable".to_string(),
            })
        }
    }

    /// Builds a minimal in-memory DOCX with one `<w:p>` per input string.
    pub fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
        let body: String = paragraphs
            .iter()
            .map(|p| format!("<w:p><w:r><w:t>{p}</w:t></w:r></w:p>"))
            .collect();
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:body>{body}</w:body>
</w:document>"#
        );

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        writer.start_file("word/document.xml", options).unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }
}

mod scenario_tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;

    use model_gateway::ModelGateway;
    use review_engine::{fallback_observations, PROMPT_TEXT_BUDGET_CHARS};
    use shared_types::Severity;

    use super::support::{docx_bytes, FailingGateway, ScriptedGateway, DOCX_CONTENT_TYPE};
    use crate::api::{analyze_document, FileUpload};
    use crate::error::ServerError;
    use crate::AppState;

    fn state_with(gateway: impl ModelGateway + 'static) -> AppState {
        AppState {
            gateway: Arc::new(gateway),
            prompt_budget: PROMPT_TEXT_BUDGET_CHARS,
        }
    }

    fn upload(bytes: Vec<u8>, content_type: &str) -> FileUpload {
        FileUpload {
            filename: "expediente.docx".to_string(),
            content_type: content_type.to_string(),
            bytes: bytes.into(),
        }
    }

    #[tokio::test]
    async fn well_formed_reply_produces_structured_report() {
        let reply = "PROBLEM 1:\nDESCRIPCION: Missing signature\nGRAVEDAD: alta\n\
                     AREA: Legal\nRECOMENDACION: Add signature block";
        let state = state_with(ScriptedGateway(reply.to_string()));
        let bytes = docx_bytes(&["El expediente carece de firma del responsable."]);

        let report = analyze_document(&state, upload(bytes, DOCX_CONTENT_TYPE))
            .await
            .unwrap();

        assert_eq!(report.status, "completed");
        assert_eq!(report.total_observations, 1);
        let obs = &report.observations[0];
        assert_eq!(obs.description, "Missing signature");
        assert_eq!(obs.severity, Severity::High);
        assert_eq!(obs.area, "Legal");
        assert_eq!(obs.recommendation, "Add signature block");
    }

    #[tokio::test]
    async fn prose_reply_falls_back_to_fixed_observations() {
        let state = state_with(ScriptedGateway(
            "No issues found in this document.".to_string(),
        ));
        let bytes = docx_bytes(&["Contenido correcto."]);

        let report = analyze_document(&state, upload(bytes, DOCX_CONTENT_TYPE))
            .await
            .unwrap();

        assert_eq!(report.status, "completed");
        assert_eq!(report.total_observations, 2);
        assert_eq!(report.observations, fallback_observations());
    }

    #[tokio::test]
    async fn block_missing_severity_keeps_the_record_with_default() {
        let reply = "PROBLEMA 1:\nDESCRIPCION: Falta índice\nGRAVEDAD: alta\n\
                     AREA: Contenido\nRECOMENDACION: Agregar índice\n\
                     PROBLEMA 2:\nDESCRIPCION: Anexos incompletos\n\
                     AREA: Anexos\nRECOMENDACION: Completar anexos";
        let state = state_with(ScriptedGateway(reply.to_string()));
        let bytes = docx_bytes(&["Expediente con dos problemas."]);

        let report = analyze_document(&state, upload(bytes, DOCX_CONTENT_TYPE))
            .await
            .unwrap();

        assert_eq!(report.total_observations, 2);
        assert_eq!(report.observations[0].severity, Severity::High);
        assert_eq!(report.observations[1].severity, Severity::Medium);
        assert_eq!(report.observations[1].description, "Anexos incompletos");
    }

    #[tokio::test]
    async fn gateway_failure_still_completes_with_fallback() {
        let state = state_with(FailingGateway);
        let bytes = docx_bytes(&["Texto del expediente."]);

        let report = analyze_document(&state, upload(bytes, DOCX_CONTENT_TYPE))
            .await
            .unwrap();

        assert_eq!(report.status, "completed");
        assert_eq!(report.observations, fallback_observations());
    }

    #[tokio::test]
    async fn unsupported_content_type_is_a_client_error() {
        let state = state_with(FailingGateway);
        let err = analyze_document(&state, upload(b"hola".to_vec(), "text/plain"))
            .await
            .unwrap_err();

        assert!(matches!(err, ServerError::UnsupportedMediaType(_)));
    }

    #[tokio::test]
    async fn legacy_doc_is_rejected_with_extraction_error() {
        let state = state_with(FailingGateway);
        let err = analyze_document(
            &state,
            upload(b"\xd0\xcf\x11\xe0legacy".to_vec(), "application/msword"),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ServerError::Extraction(_)));
    }

    #[tokio::test]
    async fn document_without_text_is_a_client_error() {
        let state = state_with(FailingGateway);
        let bytes = docx_bytes(&["", ""]);

        let err = analyze_document(&state, upload(bytes, DOCX_CONTENT_TYPE))
            .await
            .unwrap_err();

        assert!(matches!(err, ServerError::EmptyDocument));
    }

    #[tokio::test]
    async fn report_carries_size_and_timing() {
        let state = state_with(ScriptedGateway(
            "PROBLEMA 1: DESCRIPCION: x GRAVEDAD: baja".to_string(),
        ));
        let bytes = docx_bytes(&["Texto."]);
        let expected_size = bytes.len() as u64;

        let report = analyze_document(&state, upload(bytes, DOCX_CONTENT_TYPE))
            .await
            .unwrap();

        assert_eq!(report.filename, "expediente.docx");
        assert_eq!(report.file_size, Some(expected_size));
        assert!(report.processing_time.is_some());
    }
}

mod property_tests {
    use proptest::prelude::*;

    use model_gateway::GatewayError;
    use review_engine::fallback_observations;

    use crate::api::observations_or_fallback;

    proptest! {
        /// Whatever the model said, the caller gets at least one observation.
        #[test]
        fn degradation_never_yields_empty(reply in ".{0,500}") {
            let observations = observations_or_fallback(Ok(reply));
            prop_assert!(!observations.is_empty());
        }

        /// Every observation that survives the pipeline is fully populated.
        #[test]
        fn surviving_records_are_fully_populated(reply in ".{0,500}") {
            for obs in observations_or_fallback(Ok(reply)) {
                prop_assert!(!obs.description.trim().is_empty());
                prop_assert!(!obs.area.trim().is_empty());
                prop_assert!(!obs.recommendation.trim().is_empty());
            }
        }
    }

    #[test]
    fn gateway_failure_falls_back_deterministically() {
        let observations = observations_or_fallback(Err(GatewayError::EmptyCompletion));
        assert_eq!(observations, fallback_observations());
    }
}
