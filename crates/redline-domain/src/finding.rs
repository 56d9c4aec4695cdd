//! Finding module - a single reconciled compliance issue

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a finding within one result set
///
/// When the upstream model supplies an id it is kept as-is; otherwise the
/// validator synthesizes a UUIDv7, which is unpredictable and collision-free
/// without coordination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FindingId(String);

impl FindingId {
    /// Generate a fresh UUIDv7-based id
    pub fn generate() -> Self {
        Self(uuid::Uuid::now_v7().to_string())
    }

    /// Wrap a model-supplied id
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FindingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category of a compliance issue
///
/// Unrecognized categories from the model decode to `Other` rather than
/// failing the whole response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Font family or size issue
    Font,
    /// Layout/formatting issue
    Format,
    /// Numbering or figure issue
    Number,
    /// Color usage issue
    Color,
    /// Textual content issue
    Content,
    /// Anything the model reported outside the known set
    #[serde(other)]
    Other,
}

/// Severity of a finding
///
/// Unrecognized severities decode to `Other`; they still count toward the
/// result total but toward none of the three severity buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Must be fixed before submission
    Critical,
    /// Should be reviewed
    Warning,
    /// Optional improvement
    Suggestion,
    /// Anything the model reported outside the known set
    #[serde(other)]
    Other,
}

/// A verified anchor into the source document
///
/// Exactly one of two shapes, matching the shape of the document it was
/// validated against: an absolute character range, or a paragraph index plus
/// a literal substring of that paragraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Location {
    /// Absolute character-offset anchor into `full_text`
    #[serde(rename_all = "camelCase")]
    Offset {
        /// Start offset (inclusive, characters)
        start_index: usize,
        /// End offset (exclusive, characters)
        end_index: usize,
        /// The text at `[start_index, end_index)`; ground truth after
        /// validation
        exact_text: String,
        /// Optional surrounding context for display
        #[serde(default, skip_serializing_if = "Option::is_none")]
        context: Option<String>,
    },
    /// Paragraph-index anchor; navigation is a literal substring search
    #[serde(rename_all = "camelCase")]
    Paragraph {
        /// Index into the document's paragraph sequence
        paragraph_index: usize,
        /// Literal substring of the paragraph's text
        searchable_text: String,
        /// Optional surrounding context for display
        #[serde(default, skip_serializing_if = "Option::is_none")]
        context: Option<String>,
    },
}

/// Instruction for an automatic fix of a finding's span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixDirective {
    /// Replacement text for the anchored span
    pub replacement: String,

    /// Optional human-readable note about the fix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A single reconciled compliance finding
///
/// Immutable once validated: the validator may rewrite the location's quoted
/// text to the actual matched substring before freezing it, but nothing
/// downstream mutates a finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    /// Unique id within the result set
    pub id: FindingId,

    /// Issue category
    pub category: Category,

    /// Short title
    pub title: String,

    /// Full description of the issue
    pub description: String,

    /// Severity bucket
    pub severity: Severity,

    /// Verified anchor into the document
    pub location: Location,

    /// What the text should look like instead
    pub expected: String,

    /// Whether the client may apply `fix` without review
    pub auto_fixable: bool,

    /// Optional automatic fix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix: Option<FixDirective>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finding_id_generate_unique() {
        let a = FindingId::generate();
        let b = FindingId::generate();
        assert_ne!(a, b);
        // UUID strings are 36 characters (8-4-4-4-12 with hyphens)
        assert_eq!(a.as_str().len(), 36);
    }

    #[test]
    fn test_category_decodes_unknown_as_other() {
        let c: Category = serde_json::from_str("\"font\"").unwrap();
        assert_eq!(c, Category::Font);
        let c: Category = serde_json::from_str("\"margins\"").unwrap();
        assert_eq!(c, Category::Other);
    }

    #[test]
    fn test_severity_decodes_unknown_as_other() {
        let s: Severity = serde_json::from_str("\"critical\"").unwrap();
        assert_eq!(s, Severity::Critical);
        let s: Severity = serde_json::from_str("\"blocker\"").unwrap();
        assert_eq!(s, Severity::Other);
    }

    #[test]
    fn test_location_serializes_camel_case() {
        let loc = Location::Offset {
            start_index: 3,
            end_index: 8,
            exact_text: "quick".to_string(),
            context: None,
        };
        let json = serde_json::to_value(&loc).unwrap();
        assert_eq!(json["startIndex"], 3);
        assert_eq!(json["endIndex"], 8);
        assert_eq!(json["exactText"], "quick");
        assert!(json.get("context").is_none());
    }

    #[test]
    fn test_location_paragraph_shape() {
        let loc = Location::Paragraph {
            paragraph_index: 2,
            searchable_text: "must be".to_string(),
            context: Some("the span must be bold".to_string()),
        };
        let json = serde_json::to_value(&loc).unwrap();
        assert_eq!(json["paragraphIndex"], 2);
        assert_eq!(json["searchableText"], "must be");
        assert_eq!(json["context"], "the span must be bold");
    }

    #[test]
    fn test_finding_round_trip() {
        let finding = Finding {
            id: FindingId::from_raw("f-1"),
            category: Category::Font,
            title: "Wrong font".to_string(),
            description: "Body text must use Times New Roman".to_string(),
            severity: Severity::Warning,
            location: Location::Offset {
                start_index: 0,
                end_index: 4,
                exact_text: "Body".to_string(),
                context: None,
            },
            expected: "Times New Roman".to_string(),
            auto_fixable: false,
            fix: None,
        };
        let json = serde_json::to_string(&finding).unwrap();
        let back: Finding = serde_json::from_str(&json).unwrap();
        assert_eq!(finding, back);
    }
}
