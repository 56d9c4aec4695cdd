//! Parse raw model output into a provisional result

use crate::error::EngineError;
use crate::types::ProvisionalResult;

/// Parse the model's raw textual reply into a provisional result set
///
/// The provider is assumed to wrap valid JSON in at most leading and
/// trailing prose, never interleaved prose, so extraction is a greedy
/// first-`{`-to-last-`}` slice rather than balanced-brace parsing. When no
/// braces are present the full text is tried as-is.
///
/// A reply that cannot be parsed surfaces `MalformedResponse` carrying the
/// raw text; the caller decides whether to retry or fail the request; this
/// never degrades to an empty result.
pub fn parse_model_response(raw: &str) -> Result<ProvisionalResult, EngineError> {
    let candidate = extract_json(raw);

    serde_json::from_str(candidate).map_err(|e| EngineError::MalformedResponse {
        detail: e.to_string(),
        raw: raw.to_string(),
    })
}

/// Slice out the outermost brace-delimited region, if any
fn extract_json(raw: &str) -> &str {
    match (raw.find('{'), raw.rfind('}')) {
        (Some(start), Some(end)) if start < end => &raw[start..=end],
        _ => raw,
    }
}
