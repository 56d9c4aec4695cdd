//! Prompt construction for the upstream compliance reviewer

use redline_domain::document::DocumentModel;
use serde_json::json;

/// Builds the system prompt and document payload for one analysis call
pub struct PromptBuilder<'a> {
    doc: &'a DocumentModel,
}

impl<'a> PromptBuilder<'a> {
    /// Create a prompt builder for the given document
    pub fn new(doc: &'a DocumentModel) -> Self {
        Self { doc }
    }

    /// The system prompt: review instructions plus the response schema
    ///
    /// Templated text only; whether the model follows it is exactly what
    /// the reconciliation pipeline exists to verify.
    pub fn system_prompt(&self) -> String {
        let mut prompt = String::new();
        prompt.push_str(REVIEW_INSTRUCTIONS);
        prompt.push_str("\n\n");

        if self.doc.paragraphs.is_some() {
            prompt.push_str(PARAGRAPH_LOCATION_FORMAT);
        } else {
            prompt.push_str(OFFSET_LOCATION_FORMAT);
        }
        prompt.push_str("\n\n");
        prompt.push_str(OUTPUT_FORMAT_REMINDER);
        prompt
    }

    /// The user payload: the document as JSON
    pub fn payload(&self) -> serde_json::Value {
        match &self.doc.paragraphs {
            Some(paragraphs) => json!({
                "documentText": self.doc.full_text,
                "paragraphs": paragraphs,
            }),
            None => json!({
                "documentText": self.doc.full_text,
            }),
        }
    }
}

const REVIEW_INSTRUCTIONS: &str = r#"You are a document compliance reviewer. Analyze the supplied document and report every compliance issue you find as a JSON object with this shape:

{
  "summary": {"totalIssues": 0, "critical": 0, "warnings": 0, "suggestions": 0},
  "issues": [
    {
      "category": "font|format|number|color|content",
      "title": "short issue title",
      "description": "what is wrong and why",
      "severity": "critical|warning|suggestion",
      "location": { ... },
      "expected": "what the text should look like instead",
      "autoFixable": false,
      "fix": {"replacement": "replacement text"}
    }
  ]
}"#;

const OFFSET_LOCATION_FORMAT: &str = r#"Locations use absolute character offsets into the document text:

"location": {"startIndex": 0, "endIndex": 0, "exactText": "the exact text at that range", "context": "surrounding text"}

Offsets count characters from the start of the document. exactText must be copied verbatim from the document."#;

const PARAGRAPH_LOCATION_FORMAT: &str = r#"Locations reference the supplied paragraph list:

"location": {"paragraphIndex": 0, "searchableText": "text copied verbatim from that paragraph", "context": "surrounding text"}

searchableText must appear literally in the paragraph it points at."#;

const OUTPUT_FORMAT_REMINDER: &str =
    "Return ONLY the JSON object. No markdown fences, no explanations.";
