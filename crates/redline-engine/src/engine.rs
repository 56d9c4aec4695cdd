//! Core analysis orchestration

use crate::aggregate::aggregate;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::parser::parse_model_response;
use crate::prompt::PromptBuilder;
use crate::validator::{RejectionReason, SpanValidator, Validation};
use redline_domain::document::DocumentModel;
use redline_domain::result::{AnalysisResult, ValidationStats};
use redline_domain::traits::{ModelProvider, ProviderErrorKind, ProviderFault};
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Orchestrates one document analysis end to end
///
/// Size check, upstream call, parse, per-finding validation, aggregation,
/// in strict sequence, with the upstream call as the only suspension point.
/// No retries happen here; retry policy belongs to the transport layer.
pub struct AnalysisEngine<P>
where
    P: ModelProvider,
{
    provider: Arc<P>,
    config: EngineConfig,
    validator: SpanValidator,
    model_name: String,
}

impl<P> AnalysisEngine<P>
where
    P: ModelProvider + Send + Sync + 'static,
{
    /// Create a new engine around a provider and policy configuration
    pub fn new(provider: P, config: EngineConfig) -> Self {
        let validator = SpanValidator::new(&config);
        Self {
            provider: Arc::new(provider),
            config,
            validator,
            model_name: "model".to_string(),
        }
    }

    /// Set the model name stamped into result metadata
    pub fn with_model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self
    }

    /// Analyze a document and return the reconciled result
    pub async fn analyze(&self, doc: &DocumentModel) -> Result<AnalysisResult, EngineError> {
        // Reject oversized documents before paying for an upstream call
        let doc_len = doc.char_len();
        if doc_len > self.config.max_document_length {
            return Err(EngineError::DocumentTooLarge(
                doc_len,
                self.config.max_document_length,
            ));
        }

        info!(
            "Starting analysis: document length {}, {} paragraphs",
            doc_len,
            doc.paragraph_count()
        );

        let builder = PromptBuilder::new(doc);
        let system_prompt = builder.system_prompt();
        let payload = builder.payload();

        let raw = timeout(
            self.config.analysis_timeout(),
            self.call_model(system_prompt, payload),
        )
        .await
        .map_err(|_| EngineError::Upstream {
            kind: ProviderErrorKind::Timeout,
            message: "upstream call exceeded the analysis deadline".to_string(),
        })??;

        debug!("Model response length: {} chars", raw.len());

        let provisional = parse_model_response(&raw)?;
        info!("Parsed {} provisional findings", provisional.issues.len());

        let mut survivors = Vec::new();
        let mut stats = ValidationStats {
            original: provisional.issues.len(),
            ..Default::default()
        };

        for (idx, candidate) in provisional.issues.iter().enumerate() {
            match self.validator.validate(candidate, doc) {
                Validation::Accepted(finding) => {
                    stats.validated += 1;
                    survivors.push(finding);
                }
                Validation::Rejected(RejectionReason::Bounds) => {
                    warn!("Finding {} rejected: anchor out of bounds", idx);
                    stats.rejected_by_bounds += 1;
                }
                Validation::Rejected(RejectionReason::Text) => {
                    warn!("Finding {} rejected: claimed text not matched", idx);
                    stats.rejected_by_text += 1;
                }
            }
        }

        info!(
            "Analysis complete: {} validated, {} rejected by bounds, {} rejected by text",
            stats.validated, stats.rejected_by_bounds, stats.rejected_by_text
        );

        Ok(aggregate(survivors, doc, stats, &self.model_name))
    }

    /// Invoke the provider on a blocking worker thread
    async fn call_model(
        &self,
        system_prompt: String,
        payload: serde_json::Value,
    ) -> Result<String, EngineError> {
        let provider = Arc::clone(&self.provider);

        tokio::task::spawn_blocking(move || {
            provider
                .complete(&system_prompt, &payload)
                .map_err(|e| EngineError::Upstream {
                    kind: e.kind(),
                    message: e.to_string(),
                })
        })
        .await
        .map_err(|e| EngineError::Upstream {
            kind: ProviderErrorKind::Other,
            message: format!("Task join error: {}", e),
        })?
    }
}
