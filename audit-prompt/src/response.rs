//! Decoding of the model's review response.
//!
//! The proxy returns the model's raw text; this layer decodes it into
//! structured data and nothing more. Fields are lenient: missing pieces
//! default rather than fail, since the response is rendered alongside the
//! deterministic findings, not interpreted.

use audit_core::Severity;
use serde::{Deserialize, Serialize};

use crate::PromptError;

/// Supporting evidence attached to an annotation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evidence {
    /// Quoted design content backing the annotation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    /// A measured ratio, when the annotation is contrast-related.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratio: Option<f64>,
    /// Free-form examples.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<String>>,
}

/// One model-produced annotation targeting a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    /// ID of the annotated node.
    pub node_id: String,
    /// Urgency, on the same scale as deterministic findings.
    pub severity: Severity,
    /// Guideline citation.
    pub guideline: String,
    /// What the model observed.
    pub message: String,
    /// Suggested fix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Supporting evidence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<Evidence>,
}

/// The full review returned by the model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelReview {
    /// Per-node annotations.
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    /// Overall prose summary.
    #[serde(default)]
    pub summary: String,
    /// Caveats and notices from the model.
    #[serde(default)]
    pub notices: Vec<String>,
}

/// Parse the model's response text into a review.
///
/// Tries a strict JSON parse first; models occasionally wrap the object in
/// prose, so on failure the outermost brace-delimited span is retried.
///
/// # Errors
///
/// Returns [`PromptError::MalformedResponse`] when no valid JSON object
/// can be recovered from the text.
pub fn parse_review(text: &str) -> Result<ModelReview, PromptError> {
    if let Ok(review) = serde_json::from_str::<ModelReview>(text) {
        return Ok(review);
    }
    let start = text.find('{').ok_or(PromptError::MalformedResponse)?;
    let end = text.rfind('}').ok_or(PromptError::MalformedResponse)?;
    if end < start {
        return Err(PromptError::MalformedResponse);
    }
    serde_json::from_str(&text[start..=end]).map_err(|_| PromptError::MalformedResponse)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BARE: &str = r#"{
        "annotations": [
            {
                "nodeId": "1:23",
                "severity": "warning",
                "guideline": "WCAG 1.4.11",
                "message": "Focus ring blends into the card border.",
                "suggestion": "Darken the ring to reach 3:1.",
                "evidence": { "ratio": 1.9 }
            }
        ],
        "summary": "One non-text contrast issue.",
        "notices": ["Checked 4 nodes."]
    }"#;

    #[test]
    fn test_parse_bare_json() {
        let review = parse_review(BARE).expect("should parse");
        assert_eq!(review.annotations.len(), 1);
        assert_eq!(review.annotations[0].node_id, "1:23");
        assert_eq!(review.annotations[0].severity, Severity::Warning);
        assert_eq!(
            review.annotations[0].evidence.as_ref().and_then(|e| e.ratio),
            Some(1.9)
        );
        assert_eq!(review.notices.len(), 1);
    }

    #[test]
    fn test_parse_prose_wrapped_json() {
        let wrapped = format!("Here is the review you asked for:\n\n{BARE}");
        let review = parse_review(&wrapped).expect("should salvage");
        assert_eq!(review.annotations.len(), 1);
        assert_eq!(review.summary, "One non-text contrast issue.");
    }

    #[test]
    fn test_parse_missing_fields_default() {
        let review = parse_review(r#"{"summary": "All clear."}"#).expect("should parse");
        assert!(review.annotations.is_empty());
        assert!(review.notices.is_empty());
        assert_eq!(review.summary, "All clear.");
    }

    #[test]
    fn test_parse_rejects_braceless_text() {
        assert!(matches!(
            parse_review("the model refused to answer"),
            Err(PromptError::MalformedResponse)
        ));
    }

    #[test]
    fn test_parse_rejects_invalid_object() {
        assert!(parse_review("prefix { not json } suffix").is_err());
    }
}
