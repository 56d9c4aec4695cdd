//! Result aggregation - recompute summary counts from survivors

use redline_domain::document::DocumentModel;
use redline_domain::finding::{Finding, Severity};
use redline_domain::result::{AnalysisMeta, AnalysisResult, Summary, ValidationStats};
use std::time::{SystemTime, UNIX_EPOCH};

/// Version stamp for results produced by this pipeline
pub const PROCESSING_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Assemble the final result from the surviving findings
///
/// Summary counts are recomputed here, never copied from the model's
/// self-reported summary. Severity sub-counts are exact partitions;
/// unrecognized severities count toward the total only. Survivors keep
/// parser emission order; no reordering, no deduplication.
pub fn aggregate(
    survivors: Vec<Finding>,
    doc: &DocumentModel,
    validation_stats: ValidationStats,
    model: &str,
) -> AnalysisResult {
    let mut critical = 0;
    let mut warnings = 0;
    let mut suggestions = 0;
    for finding in &survivors {
        match finding.severity {
            Severity::Critical => critical += 1,
            Severity::Warning => warnings += 1,
            Severity::Suggestion => suggestions += 1,
            Severity::Other => {}
        }
    }

    let summary = Summary {
        total_issues: survivors.len(),
        critical,
        warnings,
        suggestions,
        document_length: doc.char_len(),
    };

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();

    AnalysisResult {
        summary,
        issues: survivors,
        validation_stats,
        meta: AnalysisMeta {
            model: model.to_string(),
            timestamp,
            processing_version: PROCESSING_VERSION.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redline_domain::finding::{Category, FindingId, Location};

    fn finding(severity: Severity) -> Finding {
        Finding {
            id: FindingId::generate(),
            category: Category::Content,
            title: "t".to_string(),
            description: "d".to_string(),
            severity,
            location: Location::Offset {
                start_index: 0,
                end_index: 1,
                exact_text: "x".to_string(),
                context: None,
            },
            expected: "e".to_string(),
            auto_fixable: false,
            fix: None,
        }
    }

    #[test]
    fn test_counts_partition_by_severity() {
        let doc = DocumentModel::from_text("0123456789");
        let survivors = vec![
            finding(Severity::Critical),
            finding(Severity::Warning),
            finding(Severity::Warning),
            finding(Severity::Suggestion),
        ];

        let result = aggregate(survivors, &doc, ValidationStats::default(), "m");
        assert_eq!(result.summary.total_issues, 4);
        assert_eq!(result.summary.critical, 1);
        assert_eq!(result.summary.warnings, 2);
        assert_eq!(result.summary.suggestions, 1);
        assert_eq!(result.summary.document_length, 10);
    }

    #[test]
    fn test_unrecognized_severity_counts_toward_total_only() {
        let doc = DocumentModel::from_text("x");
        let survivors = vec![finding(Severity::Other), finding(Severity::Critical)];

        let result = aggregate(survivors, &doc, ValidationStats::default(), "m");
        assert_eq!(result.summary.total_issues, 2);
        let sub_counts =
            result.summary.critical + result.summary.warnings + result.summary.suggestions;
        assert_eq!(sub_counts, 1);
        assert!(sub_counts <= result.summary.total_issues);
    }

    #[test]
    fn test_order_preserved() {
        let doc = DocumentModel::from_text("x");
        let mut first = finding(Severity::Warning);
        first.title = "first".to_string();
        let mut second = finding(Severity::Critical);
        second.title = "second".to_string();

        let result = aggregate(vec![first, second], &doc, ValidationStats::default(), "m");
        assert_eq!(result.issues[0].title, "first");
        assert_eq!(result.issues[1].title, "second");
    }

    #[test]
    fn test_stats_and_meta_attached() {
        let doc = DocumentModel::from_text("x");
        let stats = ValidationStats {
            original: 5,
            validated: 0,
            rejected_by_bounds: 3,
            rejected_by_text: 2,
        };

        let result = aggregate(vec![], &doc, stats, "test-model");
        assert_eq!(result.validation_stats, stats);
        assert_eq!(result.meta.model, "test-model");
        assert_eq!(result.meta.processing_version, PROCESSING_VERSION);
        assert!(result.meta.timestamp > 0);
    }
}
