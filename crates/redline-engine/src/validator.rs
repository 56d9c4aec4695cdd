//! Span validation - confirm or repair a claimed location against the
//! document

use crate::config::EngineConfig;
use crate::matcher::similarity;
use crate::types::{ProvisionalFinding, ProvisionalLocation};
use redline_domain::document::DocumentModel;
use redline_domain::finding::{Category, Finding, FindingId, Location, Severity};

/// Why a finding was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    /// Indices out of range, or the anchor shape itself is unusable
    Bounds,
    /// The claimed text could not be matched with enough confidence
    Text,
}

/// Outcome of validating one provisional finding
///
/// Rejection is a classification, not an error: the caller aggregates
/// reasons into counts and moves on.
#[derive(Debug, Clone)]
pub enum Validation {
    /// The finding survived; its location is now ground truth
    Accepted(Finding),
    /// The finding was dropped for the given reason
    Rejected(RejectionReason),
}

/// Validates claimed locations against the document
pub struct SpanValidator {
    threshold: f64,
    max_compare_length: usize,
}

impl SpanValidator {
    /// Create a validator using the engine's policy configuration
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            threshold: config.similarity_threshold,
            max_compare_length: config.max_compare_length,
        }
    }

    /// Confirm or repair one provisional finding's location
    ///
    /// Offset form: in-bounds offsets are authoritative. An exact match is
    /// accepted unchanged; a near-match (similarity at or above the
    /// threshold) is accepted with the quoted text rewritten to the actual
    /// substring; anything else is a text rejection.
    ///
    /// Paragraph form: exact substring containment only. Downstream
    /// navigation performs a literal text search, so a fuzzy-matched
    /// substring that is not literally present could never be located by
    /// the consumer.
    pub fn validate(&self, provisional: &ProvisionalFinding, doc: &DocumentModel) -> Validation {
        let Some(location) = &provisional.location else {
            return Validation::Rejected(RejectionReason::Bounds);
        };

        if location.is_offset_form() {
            self.validate_offset(provisional, location, doc)
        } else if location.is_paragraph_form() {
            self.validate_paragraph(provisional, location, doc)
        } else {
            Validation::Rejected(RejectionReason::Bounds)
        }
    }

    fn validate_offset(
        &self,
        provisional: &ProvisionalFinding,
        location: &ProvisionalLocation,
        doc: &DocumentModel,
    ) -> Validation {
        let (Some(start), Some(end)) = (location.start_index, location.end_index) else {
            return Validation::Rejected(RejectionReason::Bounds);
        };
        if start < 0 || end < 0 {
            return Validation::Rejected(RejectionReason::Bounds);
        }
        let (start, end) = (start as usize, end as usize);
        if start >= end || end > doc.char_len() {
            return Validation::Rejected(RejectionReason::Bounds);
        }

        let Some(actual) = doc.slice_chars(start, end) else {
            return Validation::Rejected(RejectionReason::Bounds);
        };
        let claimed = location.exact_text.as_deref().unwrap_or("");

        let exact_text = if actual == claimed {
            claimed.to_string()
        } else {
            // Cap both sides before paying the O(n·m) distance
            if claimed.chars().count() > self.max_compare_length
                || end - start > self.max_compare_length
            {
                return Validation::Rejected(RejectionReason::Text);
            }
            if similarity(actual, claimed) < self.threshold {
                return Validation::Rejected(RejectionReason::Text);
            }
            // Near-match: the offsets are authoritative, the quote was
            // advisory; anchor to ground truth
            actual.to_string()
        };

        let validated = Location::Offset {
            start_index: start,
            end_index: end,
            exact_text,
            context: location.context.clone(),
        };
        Validation::Accepted(freeze(provisional, validated))
    }

    fn validate_paragraph(
        &self,
        provisional: &ProvisionalFinding,
        location: &ProvisionalLocation,
        doc: &DocumentModel,
    ) -> Validation {
        let Some(index) = location.paragraph_index else {
            return Validation::Rejected(RejectionReason::Bounds);
        };
        if index < 0 {
            return Validation::Rejected(RejectionReason::Bounds);
        }
        // Also covers a document with no paragraph decomposition at all
        let Some(paragraph) = doc.paragraph(index as usize) else {
            return Validation::Rejected(RejectionReason::Bounds);
        };

        let searchable = match location.searchable_text.as_deref() {
            Some(text) if !text.is_empty() => text,
            _ => return Validation::Rejected(RejectionReason::Bounds),
        };

        if !paragraph.text.contains(searchable) {
            return Validation::Rejected(RejectionReason::Text);
        }

        let validated = Location::Paragraph {
            paragraph_index: index as usize,
            searchable_text: searchable.to_string(),
            context: location.context.clone(),
        };
        Validation::Accepted(freeze(provisional, validated))
    }
}

/// Build the immutable finding from a provisional one and its verified
/// location, synthesizing an id when the model supplied none
fn freeze(provisional: &ProvisionalFinding, location: Location) -> Finding {
    Finding {
        id: provisional
            .id
            .clone()
            .map(FindingId::from_raw)
            .unwrap_or_else(FindingId::generate),
        category: provisional.category.unwrap_or(Category::Other),
        title: provisional.title.clone().unwrap_or_default(),
        description: provisional.description.clone().unwrap_or_default(),
        severity: provisional.severity.unwrap_or(Severity::Other),
        location,
        expected: provisional.expected.clone().unwrap_or_default(),
        auto_fixable: provisional.auto_fixable.unwrap_or(false),
        fix: provisional.fix.clone(),
    }
}
