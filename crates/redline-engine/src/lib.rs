//! Redline Engine
//!
//! Turns an upstream model's free-form compliance analysis into a set of
//! verified, precisely-located findings.
//!
//! # Overview
//!
//! The model's output is untrusted: it can hallucinate offsets, truncate
//! JSON, or quote text that no longer matches the source. The engine
//! reconciles every claimed location against the original document and
//! drops, silently but countably, whatever cannot be anchored. A corrupted
//! anchor must never reach a client that performs document edits.
//!
//! # Architecture
//!
//! ```text
//! DocumentModel → AnalysisEngine → ModelProvider → ResponseParser
//!                      → SpanValidator (per finding) → ResultAggregator
//! ```
//!
//! # Key Behaviors
//!
//! - **Greedy JSON extraction**: the provider wraps valid JSON in at most
//!   leading/trailing prose, never interleaved prose
//! - **Anchor to ground truth**: in-bounds offsets are authoritative; the
//!   model's quoted text is advisory and gets rewritten on a near-match
//! - **Rejection is not an error**: unanchorable findings are classified
//!   and counted, never raised; one bad finding must not invalidate an
//!   otherwise-useful result set
//!
//! # Example Usage
//!
//! ```no_run
//! use redline_engine::{AnalysisEngine, EngineConfig};
//! use redline_domain::DocumentModel;
//! use redline_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = MockProvider::new(r#"{"issues":[]}"#);
//! let engine = AnalysisEngine::new(provider, EngineConfig::default())
//!     .with_model_name("mock");
//!
//! let doc = DocumentModel::from_text("The quick brown fox.");
//! let result = engine.analyze(&doc).await?;
//!
//! println!("Survivors: {}", result.summary.total_issues);
//! println!("Rejected: {}", result.validation_stats.rejected_by_text);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod aggregate;
mod config;
mod engine;
mod error;
mod matcher;
mod parser;
mod prompt;
mod types;
mod validator;

#[cfg(test)]
mod tests;

pub use aggregate::aggregate;
pub use config::EngineConfig;
pub use engine::AnalysisEngine;
pub use error::EngineError;
pub use matcher::{edit_distance, similarity};
pub use parser::parse_model_response;
pub use prompt::PromptBuilder;
pub use types::{ProvisionalFinding, ProvisionalLocation, ProvisionalResult};
pub use validator::{RejectionReason, SpanValidator, Validation};
