//! EvalIA API Server
//!
//! HTTP front end for technical dossier analysis: a document is uploaded,
//! its text extracted, and a language model is asked to enumerate
//! observations (deficiencies with severity, area, and recommendation).
//!
//! ## Architecture
//!
//! - `shared-extract` turns PDF/DOCX bytes into plain text
//! - `review-engine` builds the prompt and parses the model reply
//! - `model-gateway` is the completion provider boundary
//! - this binary wires them behind two routes and maps failures
//!
//! The endpoint never returns an empty analysis: when the model call fails
//! or its reply yields nothing, a fixed fallback set is substituted and the
//! request still completes.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;
#[cfg(test)]
mod tests;

use api::{handle_health, handle_process_document};
use model_gateway::{GatewayConfig, ModelGateway, OpenAiGateway};

/// Maximum accepted upload size.
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Command-line arguments for the EvalIA server
#[derive(Parser, Debug)]
#[command(name = "evalia-server")]
#[command(about = "EvalIA server for technical dossier analysis")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "8000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// API key for the completion provider
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Model used for document analysis
    #[arg(long, default_value = "gpt-4o-mini")]
    model: String,

    /// Base URL of the completion provider
    #[arg(long, default_value = model_gateway::DEFAULT_BASE_URL)]
    base_url: String,

    /// Completion request timeout in seconds
    #[arg(long, default_value = "60")]
    gateway_timeout: u64,

    /// Character budget for document text embedded in the prompt
    #[arg(long, default_value_t = review_engine::PROMPT_TEXT_BUDGET_CHARS)]
    prompt_budget: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Completion provider used for document analysis
    pub gateway: Arc<dyn ModelGateway>,
    /// Character budget for document text embedded in the prompt
    pub prompt_budget: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting EvalIA server on {}:{}", args.host, args.port);

    let gateway = OpenAiGateway::new(GatewayConfig {
        api_key: args.api_key,
        model: args.model.clone(),
        base_url: args.base_url,
        system_prompt: review_engine::SYSTEM_PROMPT.to_string(),
        timeout_secs: args.gateway_timeout,
    })?;

    let state = AppState {
        gateway: Arc::new(gateway),
        prompt_budget: args.prompt_budget,
    };

    // Configure CORS for the browser frontend
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        .route("/health", get(handle_health))
        .route("/api/process-document", post(handle_process_document))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors)
        .with_state(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Analysis model: {}", args.model);
    info!("Prompt text budget: {} chars", args.prompt_budget);

    axum::serve(listener, app).await?;

    Ok(())
}
