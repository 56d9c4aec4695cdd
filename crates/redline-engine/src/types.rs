//! Provisional (untrusted) response types
//!
//! These mirror the final result shape but carry what the model actually
//! said, before any location has been checked. Everything optional is
//! optional because the model omits fields freely; the validator decides
//! what survives.

use redline_domain::finding::{Category, FixDirective, Severity};
use serde::Deserialize;

/// The model's claimed result set, locations unchecked
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ProvisionalResult {
    /// The model's self-reported summary; advisory only, never trusted
    pub summary: Option<serde_json::Value>,

    /// Claimed findings in emission order
    pub issues: Vec<ProvisionalFinding>,
}

/// One claimed finding, prior to validation
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ProvisionalFinding {
    /// Model-supplied id, if any
    pub id: Option<String>,

    /// Issue category; unknown strings decode to `Other`
    pub category: Option<Category>,

    /// Short title
    pub title: Option<String>,

    /// Full description
    pub description: Option<String>,

    /// Severity bucket; unknown strings decode to `Other`
    pub severity: Option<Severity>,

    /// Claimed location, in either shape or neither
    pub location: Option<ProvisionalLocation>,

    /// What the text should look like instead
    pub expected: Option<String>,

    /// Whether the model believes the fix can be applied automatically
    pub auto_fixable: Option<bool>,

    /// Optional automatic fix
    pub fix: Option<FixDirective>,
}

/// A claimed location before validation
///
/// Holds the union of both anchor shapes; indices are signed because the
/// model can and does emit negative offsets.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ProvisionalLocation {
    /// Claimed start offset (characters)
    pub start_index: Option<i64>,

    /// Claimed end offset (characters, exclusive)
    pub end_index: Option<i64>,

    /// Text the model says lives at the offset range
    pub exact_text: Option<String>,

    /// Claimed paragraph index
    pub paragraph_index: Option<i64>,

    /// Text the model says the paragraph contains
    pub searchable_text: Option<String>,

    /// Optional surrounding context
    pub context: Option<String>,
}

impl ProvisionalLocation {
    /// Whether this location carries the offset shape
    ///
    /// A location carrying both shapes is treated as offset form, since
    /// in-bounds offsets are authoritative.
    pub fn is_offset_form(&self) -> bool {
        self.start_index.is_some() || self.end_index.is_some()
    }

    /// Whether this location carries the paragraph shape
    pub fn is_paragraph_form(&self) -> bool {
        !self.is_offset_form() && self.paragraph_index.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_offset_form() {
        let json = r#"{
            "severity": "critical",
            "location": {"startIndex": 3, "endIndex": 9, "exactText": "quick"}
        }"#;
        let finding: ProvisionalFinding = serde_json::from_str(json).unwrap();
        let location = finding.location.unwrap();
        assert!(location.is_offset_form());
        assert_eq!(location.start_index, Some(3));
        assert_eq!(location.exact_text.as_deref(), Some("quick"));
        assert_eq!(finding.severity, Some(Severity::Critical));
    }

    #[test]
    fn test_deserialize_paragraph_form() {
        let json = r#"{"location": {"paragraphIndex": 2, "searchableText": "must"}}"#;
        let finding: ProvisionalFinding = serde_json::from_str(json).unwrap();
        let location = finding.location.unwrap();
        assert!(location.is_paragraph_form());
        assert!(!location.is_offset_form());
    }

    #[test]
    fn test_deserialize_negative_offsets() {
        let json = r#"{"location": {"startIndex": -1, "endIndex": 5, "exactText": "x"}}"#;
        let finding: ProvisionalFinding = serde_json::from_str(json).unwrap();
        assert_eq!(finding.location.unwrap().start_index, Some(-1));
    }

    #[test]
    fn test_deserialize_empty_object() {
        let finding: ProvisionalFinding = serde_json::from_str("{}").unwrap();
        assert!(finding.location.is_none());
        assert!(finding.severity.is_none());
    }

    #[test]
    fn test_both_shapes_prefers_offset() {
        let json = r#"{
            "startIndex": 0, "endIndex": 2, "exactText": "ab",
            "paragraphIndex": 1, "searchableText": "ab"
        }"#;
        let location: ProvisionalLocation = serde_json::from_str(json).unwrap();
        assert!(location.is_offset_form());
        assert!(!location.is_paragraph_form());
    }
}
