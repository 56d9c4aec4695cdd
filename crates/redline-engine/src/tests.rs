//! Integration tests for the analysis engine

#[cfg(test)]
mod tests {
    use crate::{AnalysisEngine, EngineConfig, EngineError};
    use redline_domain::document::DocumentModel;
    use redline_domain::finding::{Location, Severity};
    use redline_domain::traits::ProviderErrorKind;
    use redline_llm::MockProvider;

    fn engine(raw_response: &str) -> AnalysisEngine<MockProvider> {
        AnalysisEngine::new(MockProvider::new(raw_response), EngineConfig::default())
            .with_model_name("mock-model")
    }

    /// 150-char document: "wrongword" occupies characters 10..19
    fn reconciliation_doc() -> DocumentModel {
        let mut text = String::from("0123456789wrongword");
        while text.chars().count() < 150 {
            text.push('.');
        }
        DocumentModel::from_text(text)
    }

    #[tokio::test]
    async fn test_full_reconciliation_flow() {
        let raw = r#"Here is the result:
{
  "summary": {"totalIssues": 99, "critical": 99, "warnings": 0, "suggestions": 0},
  "issues": [
    {
      "title": "exact",
      "severity": "critical",
      "location": {"startIndex": 10, "endIndex": 19, "exactText": "wrongword"}
    },
    {
      "title": "near",
      "severity": "warning",
      "location": {"startIndex": 10, "endIndex": 19, "exactText": "wrong-word"}
    },
    {
      "title": "bad bounds",
      "severity": "warning",
      "location": {"startIndex": -1, "endIndex": 19, "exactText": "wrongword"}
    }
  ]
}
Hope this helps!"#;

        let result = engine(raw).analyze(&reconciliation_doc()).await.unwrap();

        // First finding accepted unchanged
        assert_eq!(result.issues.len(), 2);
        match &result.issues[0].location {
            Location::Offset { exact_text, .. } => assert_eq!(exact_text, "wrongword"),
            other => panic!("Expected offset location, got {:?}", other),
        }

        // Second finding accepted with the quote rewritten to ground truth
        match &result.issues[1].location {
            Location::Offset { exact_text, .. } => assert_eq!(exact_text, "wrongword"),
            other => panic!("Expected offset location, got {:?}", other),
        }

        // Third rejected by bounds; summary never copied from the model
        assert_eq!(result.validation_stats.original, 3);
        assert_eq!(result.validation_stats.validated, 2);
        assert_eq!(result.validation_stats.rejected_by_bounds, 1);
        assert_eq!(result.validation_stats.rejected_by_text, 0);
        assert_eq!(result.summary.total_issues, 2);
        assert_eq!(result.summary.critical, 1);
        assert_eq!(result.summary.warnings, 1);
        assert_eq!(result.summary.document_length, 150);
        assert_eq!(result.meta.model, "mock-model");
    }

    #[tokio::test]
    async fn test_zero_survivors_is_still_success() {
        let raw = r#"{"issues": [
            {"title": "t", "location": {"startIndex": 500, "endIndex": 510, "exactText": "x"}}
        ]}"#;
        let result = engine(raw).analyze(&reconciliation_doc()).await.unwrap();
        assert!(result.issues.is_empty());
        assert_eq!(result.summary.total_issues, 0);
        assert_eq!(result.validation_stats.rejected_by_bounds, 1);
    }

    #[tokio::test]
    async fn test_empty_issue_list() {
        let result = engine(r#"{"issues":[]}"#)
            .analyze(&reconciliation_doc())
            .await
            .unwrap();
        assert_eq!(result.summary.total_issues, 0);
        assert_eq!(result.validation_stats.original, 0);
    }

    #[tokio::test]
    async fn test_truncated_json_is_malformed() {
        let raw = r#"{"summary": {"totalIssues": 1}, "issues": [{"title": "t""#;
        let err = engine(raw).analyze(&reconciliation_doc()).await.unwrap_err();
        assert!(matches!(err, EngineError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn test_prose_only_reply_is_malformed() {
        let err = engine("I cannot analyze this document, sorry.")
            .analyze(&reconciliation_doc())
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn test_document_too_large_skips_upstream_call() {
        let provider = MockProvider::new("{}");
        let mut config = EngineConfig::default();
        config.max_document_length = 100;
        let engine = AnalysisEngine::new(provider.clone(), config);

        let doc = DocumentModel::from_text("a".repeat(200));
        let err = engine.analyze(&doc).await.unwrap_err();

        assert!(matches!(err, EngineError::DocumentTooLarge(200, 100)));
        // The whole point of the early check: no model call was paid for
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_upstream_fault_kinds_propagate() {
        for kind in [
            ProviderErrorKind::RateLimit,
            ProviderErrorKind::Auth,
            ProviderErrorKind::Overloaded,
            ProviderErrorKind::Timeout,
            ProviderErrorKind::Other,
        ] {
            let engine = AnalysisEngine::new(
                MockProvider::failing(kind),
                EngineConfig::default(),
            );
            let err = engine
                .analyze(&DocumentModel::from_text("x"))
                .await
                .unwrap_err();
            assert_eq!(err.upstream_kind(), Some(kind), "kind {:?}", kind);
        }
    }

    #[tokio::test]
    async fn test_severity_partition_excludes_unknown() {
        let raw = r#"{"issues": [
            {"severity": "critical", "location": {"startIndex": 0, "endIndex": 3, "exactText": "012"}},
            {"severity": "blocker", "location": {"startIndex": 0, "endIndex": 3, "exactText": "012"}}
        ]}"#;
        let result = engine(raw).analyze(&reconciliation_doc()).await.unwrap();

        assert_eq!(result.summary.total_issues, 2);
        assert_eq!(result.summary.critical, 1);
        assert_eq!(result.summary.warnings, 0);
        assert_eq!(result.summary.suggestions, 0);
        assert_eq!(result.issues[1].severity, Severity::Other);
    }

    #[tokio::test]
    async fn test_synthesized_ids_are_unique_within_result() {
        let raw = r#"{"issues": [
            {"location": {"startIndex": 0, "endIndex": 3, "exactText": "012"}},
            {"location": {"startIndex": 3, "endIndex": 6, "exactText": "345"}}
        ]}"#;
        let result = engine(raw).analyze(&reconciliation_doc()).await.unwrap();
        assert_eq!(result.issues.len(), 2);
        assert_ne!(result.issues[0].id, result.issues[1].id);
    }

    #[tokio::test]
    async fn test_prompt_matches_document_shape() {
        let provider = MockProvider::new(r#"{"issues":[]}"#);
        let engine = AnalysisEngine::new(provider.clone(), EngineConfig::default());

        engine
            .analyze(&DocumentModel::from_text("plain text"))
            .await
            .unwrap();

        let (prompt, payload) = provider.last_request().unwrap();
        assert!(prompt.contains("startIndex"));
        assert_eq!(payload["documentText"], "plain text");
    }
}
