//! Redline Server
//!
//! HTTP transport for the document analysis pipeline: admission control,
//! engine invocation, and error mapping onto status codes.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use config::ServerConfig;
use handlers::{create_router, AppState};
use redline_admission::AdmissionController;
use redline_engine::AnalysisEngine;
use redline_llm::{ChatProvider, ModelError};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Upstream provider construction error
    #[error("Provider error: {0}")]
    Provider(#[from] ModelError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Start the analysis HTTP server
///
/// Builds the provider, engine, and admission controller from the
/// configuration and serves until the process is stopped.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting Redline analysis server");
    info!("Bind address: {}", config.bind_addr());
    info!("Upstream model: {}", config.llm.model);
    info!(
        "Admission: {} requests per {} ms by default",
        config.admission.default_tier.max_requests, config.admission.default_tier.window_ms
    );

    let provider = ChatProvider::new(
        config.llm.endpoint.clone(),
        config.llm.api_key.clone(),
        config.llm.model.clone(),
    )?;

    let engine = AnalysisEngine::new(provider, config.engine.clone())
        .with_model_name(config.llm.model.clone());

    let key_strategy = config.admission.key_strategy;
    let state = AppState {
        engine: Arc::new(engine),
        admission: Arc::new(AdmissionController::new(config.admission.clone())),
        key_strategy,
    };

    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}
