//! HTTP request handlers for the analysis server.
//!
//! Implements document analysis and health check endpoints using axum.

use axum::{
    extract::{ConnectInfo, State},
    http::{header::RETRY_AFTER, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use redline_admission::{AdmissionController, Decision, KeyStrategy};
use redline_domain::document::{DocumentError, DocumentModel, Paragraph};
use redline_domain::result::AnalysisResult;
use redline_domain::traits::{ModelProvider, ProviderErrorKind};
use redline_engine::{AnalysisEngine, EngineError};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::warn;

/// Shared application state
pub struct AppState<P>
where
    P: ModelProvider,
{
    /// Analysis engine wrapping the upstream provider
    pub engine: Arc<AnalysisEngine<P>>,
    /// Admission controller guarding the analyze endpoint
    pub admission: Arc<AdmissionController>,
    /// How client keys are derived from requests
    pub key_strategy: KeyStrategy,
}

// Derived Clone would demand P: Clone
impl<P: ModelProvider> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            admission: Arc::clone(&self.admission),
            key_strategy: self.key_strategy,
        }
    }
}

/// Analysis request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    /// Complete document text
    pub full_text: String,

    /// Optional structured paragraph view of the same text
    #[serde(default)]
    pub paragraphs: Option<Vec<Paragraph>>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
    /// Server version
    pub version: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Request denied by the admission controller
    RateLimited(Decision),
    /// Request document failed validation
    Document(DocumentError),
    /// Analysis pipeline error
    Engine(EngineError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::RateLimited(decision) => {
                let body = Json(ErrorResponse {
                    error: "Too many requests".to_string(),
                });
                let mut response = (StatusCode::TOO_MANY_REQUESTS, body).into_response();
                let headers = response.headers_mut();
                if let Ok(value) = HeaderValue::from_str(&decision.retry_after_secs.to_string()) {
                    headers.insert(RETRY_AFTER, value);
                }
                if let Ok(value) = HeaderValue::from_str(&decision.reset_at.to_string()) {
                    headers.insert("x-ratelimit-reset", value);
                }
                response
            }
            AppError::Document(e) => {
                let body = Json(ErrorResponse {
                    error: e.to_string(),
                });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            AppError::Engine(e) => {
                let status = match &e {
                    EngineError::DocumentTooLarge(..) => StatusCode::PAYLOAD_TOO_LARGE,
                    EngineError::Upstream { kind, .. } => match kind {
                        ProviderErrorKind::RateLimit => StatusCode::TOO_MANY_REQUESTS,
                        ProviderErrorKind::Auth => StatusCode::UNAUTHORIZED,
                        _ => StatusCode::INTERNAL_SERVER_ERROR,
                    },
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                let body = Json(ErrorResponse {
                    error: e.to_string(),
                });
                (status, body).into_response()
            }
        }
    }
}

impl From<DocumentError> for AppError {
    fn from(e: DocumentError) -> Self {
        AppError::Document(e)
    }
}

impl From<EngineError> for AppError {
    fn from(e: EngineError) -> Self {
        AppError::Engine(e)
    }
}

/// Derive the namespaced admission key for one request
fn client_key(
    strategy: KeyStrategy,
    headers: &HeaderMap,
    addr: Option<SocketAddr>,
) -> String {
    let header_name = match strategy {
        KeyStrategy::ApiKey => Some("x-api-key"),
        KeyStrategy::UserId => Some("x-user-id"),
        KeyStrategy::ClientAddr => None,
    };
    let raw = header_name
        .and_then(|name| headers.get(name))
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .or_else(|| addr.map(|a| a.ip().to_string()))
        .unwrap_or_else(|| "anonymous".to_string());
    strategy.key_for(&raw)
}

/// POST /analyze - Run one document through the reconciliation pipeline
async fn analyze<P>(
    State(state): State<AppState<P>>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResult>, AppError>
where
    P: ModelProvider + Send + Sync + 'static,
{
    let key = client_key(
        state.key_strategy,
        &headers,
        connect_info.map(|ConnectInfo(addr)| addr),
    );

    let decision = state.admission.check(&key, "/analyze");
    if !decision.allowed {
        warn!("Admission denied for {}", key);
        return Err(AppError::RateLimited(decision));
    }

    let doc = match request.paragraphs {
        Some(paragraphs) => DocumentModel::with_paragraphs(request.full_text, paragraphs)?,
        None => DocumentModel::from_text(request.full_text),
    };

    let result = state.engine.analyze(&doc).await?;
    Ok(Json(result))
}

/// GET /health - Liveness probe
async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Create the axum router with all routes
///
/// CORS is fully permissive; browser-based editors call this API directly.
pub fn create_router<P>(state: AppState<P>) -> Router
where
    P: ModelProvider + Send + Sync + 'static,
{
    Router::new()
        .route("/analyze", post(analyze::<P>))
        .route("/health", get(health_check))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr() -> SocketAddr {
        "10.0.0.7:4242".parse().unwrap()
    }

    #[test]
    fn test_client_key_from_api_key_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", HeaderValue::from_static("sk-123"));

        let key = client_key(KeyStrategy::ApiKey, &headers, Some(addr()));
        assert_eq!(key, "key:sk-123");
    }

    #[test]
    fn test_client_key_from_user_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-user-id", HeaderValue::from_static("alice"));

        let key = client_key(KeyStrategy::UserId, &headers, Some(addr()));
        assert_eq!(key, "user:alice");
    }

    #[test]
    fn test_client_key_falls_back_to_peer_address() {
        let headers = HeaderMap::new();

        let key = client_key(KeyStrategy::ApiKey, &headers, Some(addr()));
        assert_eq!(key, "key:10.0.0.7");

        let key = client_key(KeyStrategy::ClientAddr, &headers, Some(addr()));
        assert_eq!(key, "addr:10.0.0.7");
    }

    #[test]
    fn test_client_key_anonymous_when_nothing_known() {
        let key = client_key(KeyStrategy::ClientAddr, &HeaderMap::new(), None);
        assert_eq!(key, "addr:anonymous");
    }
}
