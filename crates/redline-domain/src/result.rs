//! Analysis result types - survivors, recomputed counts, and statistics

use crate::finding::Finding;
use serde::{Deserialize, Serialize};

/// Summary counts over the surviving findings
///
/// Always recomputed from the issues themselves; the model's self-reported
/// summary is never copied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Total surviving findings, including unrecognized severities
    pub total_issues: usize,

    /// Findings with critical severity
    pub critical: usize,

    /// Findings with warning severity
    pub warnings: usize,

    /// Findings with suggestion severity
    pub suggestions: usize,

    /// Length of the analyzed document in characters
    pub document_length: usize,
}

/// Reconciliation statistics for one analysis
///
/// Counts only, not individual records; derived once and read-only after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationStats {
    /// Findings the parser emitted before validation
    pub original: usize,

    /// Findings that survived validation
    pub validated: usize,

    /// Findings dropped for out-of-bounds or missing anchors
    pub rejected_by_bounds: usize,

    /// Findings dropped because the claimed text could not be matched
    pub rejected_by_text: usize,
}

/// Metadata about how a result was produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisMeta {
    /// Upstream model that produced the raw analysis
    pub model: String,

    /// Unix timestamp (seconds) when the result was assembled
    pub timestamp: u64,

    /// Version of the reconciliation pipeline
    pub processing_version: String,
}

/// The final, fully reconciled analysis result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Recomputed summary counts
    pub summary: Summary,

    /// Surviving findings in parser emission order
    pub issues: Vec<Finding>,

    /// Reconciliation statistics
    pub validation_stats: ValidationStats,

    /// Production metadata
    pub meta: AnalysisMeta,
}
