//! Document module - the ground truth findings are anchored against

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a document fails its structural invariants
#[derive(Debug, Error)]
pub enum DocumentError {
    /// A paragraph's recorded index does not match its position
    #[error("Paragraph index mismatch: position {position} carries index {index}")]
    ParagraphIndexMismatch {
        /// Position of the paragraph in the sequence
        position: usize,
        /// Index value the paragraph carries
        index: usize,
    },
}

/// One paragraph of a decomposed document
///
/// The `index` is stable for the lifetime of a single analysis call and must
/// equal the paragraph's position in the sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    /// Position of this paragraph in the document sequence
    pub index: usize,

    /// Paragraph text
    pub text: String,

    /// Opaque font/style metadata, passed through untouched
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub style: serde_json::Map<String, serde_json::Value>,
}

/// The canonical representation of the document under analysis
///
/// Either plain text, or text plus an ordered paragraph sequence. Pure data;
/// the only behavior is accessors. All offsets in this system are character
/// offsets, never bytes; `slice_chars` maps to byte boundaries internally so
/// multibyte text can never panic a slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentModel {
    /// Full document text
    pub full_text: String,

    /// Optional paragraph decomposition, ordered by index
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraphs: Option<Vec<Paragraph>>,
}

impl DocumentModel {
    /// Create a plain-text document without paragraph structure
    pub fn from_text(full_text: impl Into<String>) -> Self {
        Self {
            full_text: full_text.into(),
            paragraphs: None,
        }
    }

    /// Create a document with paragraph structure
    ///
    /// Fails if any paragraph's index does not equal its position.
    pub fn with_paragraphs(
        full_text: impl Into<String>,
        paragraphs: Vec<Paragraph>,
    ) -> Result<Self, DocumentError> {
        let doc = Self {
            full_text: full_text.into(),
            paragraphs: Some(paragraphs),
        };
        doc.validate()?;
        Ok(doc)
    }

    /// Check the `paragraphs[i].index == i` invariant
    pub fn validate(&self) -> Result<(), DocumentError> {
        if let Some(paragraphs) = &self.paragraphs {
            for (position, paragraph) in paragraphs.iter().enumerate() {
                if paragraph.index != position {
                    return Err(DocumentError::ParagraphIndexMismatch {
                        position,
                        index: paragraph.index,
                    });
                }
            }
        }
        Ok(())
    }

    /// Length of the full text in characters
    pub fn char_len(&self) -> usize {
        self.full_text.chars().count()
    }

    /// Slice the full text by character offsets
    ///
    /// Returns `None` when `start >= end` or `end` exceeds the character
    /// length.
    pub fn slice_chars(&self, start: usize, end: usize) -> Option<&str> {
        if start >= end {
            return None;
        }
        let mut byte_start = None;
        let mut byte_end = None;
        for (count, (byte, _)) in self.full_text.char_indices().enumerate() {
            if count == start {
                byte_start = Some(byte);
            }
            if count == end {
                byte_end = Some(byte);
                break;
            }
        }
        let byte_start = byte_start?;
        let byte_end = match byte_end {
            Some(b) => b,
            // end may legally point one past the final character
            None if end == self.char_len() => self.full_text.len(),
            None => return None,
        };
        Some(&self.full_text[byte_start..byte_end])
    }

    /// Get a paragraph by index
    pub fn paragraph(&self, index: usize) -> Option<&Paragraph> {
        self.paragraphs.as_ref()?.get(index)
    }

    /// Number of paragraphs, zero when the document is plain text
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.as_ref().map_or(0, |p| p.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(index: usize, text: &str) -> Paragraph {
        Paragraph {
            index,
            text: text.to_string(),
            style: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_plain_text_document() {
        let doc = DocumentModel::from_text("hello world");
        assert_eq!(doc.char_len(), 11);
        assert_eq!(doc.paragraph_count(), 0);
        assert!(doc.paragraph(0).is_none());
    }

    #[test]
    fn test_paragraph_index_invariant() {
        let doc = DocumentModel::with_paragraphs(
            "a\nb",
            vec![paragraph(0, "a"), paragraph(1, "b")],
        );
        assert!(doc.is_ok());

        let bad = DocumentModel::with_paragraphs(
            "a\nb",
            vec![paragraph(0, "a"), paragraph(5, "b")],
        );
        assert!(matches!(
            bad,
            Err(DocumentError::ParagraphIndexMismatch { position: 1, index: 5 })
        ));
    }

    #[test]
    fn test_slice_chars_ascii() {
        let doc = DocumentModel::from_text("The quick brown fox");
        assert_eq!(doc.slice_chars(4, 9), Some("quick"));
        assert_eq!(doc.slice_chars(0, 3), Some("The"));
        assert_eq!(doc.slice_chars(16, 19), Some("fox"));
    }

    #[test]
    fn test_slice_chars_full_range() {
        let doc = DocumentModel::from_text("abc");
        assert_eq!(doc.slice_chars(0, 3), Some("abc"));
    }

    #[test]
    fn test_slice_chars_out_of_bounds() {
        let doc = DocumentModel::from_text("abc");
        assert_eq!(doc.slice_chars(0, 4), None);
        assert_eq!(doc.slice_chars(2, 2), None);
        assert_eq!(doc.slice_chars(3, 2), None);
    }

    #[test]
    fn test_slice_chars_multibyte() {
        // "héllo wörld": é and ö are multibyte in UTF-8
        let doc = DocumentModel::from_text("héllo wörld");
        assert_eq!(doc.char_len(), 11);
        assert_eq!(doc.slice_chars(0, 5), Some("héllo"));
        assert_eq!(doc.slice_chars(6, 11), Some("wörld"));
    }

    #[test]
    fn test_deserialize_request_shape() {
        let json = r#"{
            "fullText": "hello",
            "paragraphs": [
                {"index": 0, "text": "hello", "style": {"font": "Arial"}}
            ]
        }"#;
        let doc: DocumentModel = serde_json::from_str(json).unwrap();
        assert_eq!(doc.full_text, "hello");
        assert_eq!(doc.paragraph_count(), 1);
        assert_eq!(
            doc.paragraph(0).unwrap().style.get("font").unwrap(),
            "Arial"
        );
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn test_deserialize_without_paragraphs() {
        let doc: DocumentModel = serde_json::from_str(r#"{"fullText": "x"}"#).unwrap();
        assert!(doc.paragraphs.is_none());
    }
}
