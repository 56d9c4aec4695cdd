//! Redline Domain Layer
//!
//! Core data model for the compliance analysis service. This crate defines
//! the canonical document representation, the reconciled finding types that
//! make up an analysis result, and the trait seams through which the other
//! layers talk to infrastructure.
//!
//! ## Key Concepts
//!
//! - **DocumentModel**: the ground truth a finding is anchored against:
//!   plain text, optionally decomposed into an ordered paragraph sequence
//! - **Finding**: one verified compliance issue with an exact, navigable
//!   location (character range or paragraph + substring)
//! - **AnalysisResult**: survivors plus recomputed summary counts and
//!   reconciliation statistics
//! - **ModelProvider**: the opaque upstream language-model collaborator
//!
//! ## Architecture
//!
//! This crate holds pure data and trait definitions only. Provider
//! implementations live in `redline-llm`, the reconciliation pipeline in
//! `redline-engine`, and the transport layer in `redline-server`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod finding;
pub mod result;
pub mod traits;

// Re-exports for convenience
pub use document::{DocumentError, DocumentModel, Paragraph};
pub use finding::{Category, Finding, FindingId, FixDirective, Location, Severity};
pub use result::{AnalysisMeta, AnalysisResult, Summary, ValidationStats};
pub use traits::{ModelProvider, ProviderErrorKind, ProviderFault};
