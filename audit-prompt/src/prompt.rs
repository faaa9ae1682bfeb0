//! Review request composition.
//!
//! Serializes the extraction snapshot and the deterministic findings into
//! the message payload the hosted model proxy expects. Each serialized
//! section is truncated to a fixed byte budget so oversized documents
//! cannot blow up the request.

use audit_core::{ExtractedNode, Finding};
use serde::{Deserialize, Serialize};

use crate::PromptError;

/// Byte budget for each serialized payload section.
pub const MAX_SECTION_BYTES: usize = 8000;

/// Default model requested from the proxy.
pub const DEFAULT_MODEL: &str = "gemini-1.5-pro-latest";

/// Standing review brief sent ahead of the scan data.
const HOUSE_RULES: &str = "\
You are an accessibility expert reviewing a design canvas for WCAG 2.x and the following design standards. Provide precise, practical annotations with suggested fixes.

KEY HOUSE RULES (design system):
- Contrast: body text >= 4.5:1, large text >= 3:1. Non-text UI (borders, focus indicators) >= 3:1.
- Links in body text must not rely on color alone; underline (HTML) or perceivable alternative in apps (e.g., '>').
- Base body text >= 16px (14px minimum for small text). Use plain fonts with distinguishable glyphs (e.g., Il1!).
- Line length <= 80 characters. Left-align text. Line spacing >= 1.5x, paragraph spacing >= 1.5x line spacing.
- Headings reflect hierarchy visually and semantically. Proximity to related content, not preceding blocks.
- Buttons used for actions; links for navigation. Buttons have descriptive text. Touch targets >= 24x24px with 8-16px spacing.
- Focus/hover/active states must be visible and not color-only. Provide keyboard access and pointer alternatives.
- Tables: clear headers, captions, simple structure (no merged cells) where possible.
- Carousels: no auto-play; controls with item count.
- Forms: visible labels near inputs, required/optional clearly indicated; helpful error messages; multi-step indicators when applicable.

Map guidance to WCAG 2.x SCs (e.g., 1.4.3, 1.4.11, 2.4.6, 2.5.8, 3.3.x, 3.2.4).

Return JSON ONLY matching this schema:
{
  \"annotations\": [
    {
      \"nodeId\": \"string\",
      \"severity\": \"error\" | \"warning\" | \"info\",
      \"guideline\": \"string\",
      \"message\": \"string\",
      \"suggestion\": \"string\",
      \"evidence\": { \"snippet\"?: \"string\", \"ratio\"?: \"number\", \"examples\"?: \"string[]\" }
    }
  ],
  \"summary\": \"string\",
  \"notices\": \"string[]\"
}

Be concise but specific. Prioritize high-severity issues. Avoid duplicates of deterministic checks unless adding contextual nuance.";

/// One text part of a prompt message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptPart {
    /// Plain text content.
    pub text: String,
}

/// One message of the review conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptMessage {
    /// Message author role.
    pub role: String,
    /// Ordered message parts.
    pub parts: Vec<PromptPart>,
}

/// Options for request composition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptOptions {
    /// Name of the scanned page, echoed to the model for context.
    pub page_name: String,
}

/// Request body for the hosted model proxy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRequest {
    /// Conversation messages.
    pub messages: Vec<PromptMessage>,
    /// Model identifier to run.
    pub model: String,
}

impl ReviewRequest {
    /// Override the requested model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// Compose the review request from a scan's snapshot and findings.
///
/// The payload is a single user message: page header, the house-rules
/// brief, then the findings and the snapshot as JSON, each capped at
/// [`MAX_SECTION_BYTES`].
///
/// # Errors
///
/// Returns an error if a section fails to serialize.
pub fn build_review_request(
    records: &[ExtractedNode],
    findings: &[Finding],
    options: &PromptOptions,
) -> Result<ReviewRequest, PromptError> {
    let findings_json = serde_json::to_string(findings)?;
    let records_json = serde_json::to_string(records)?;
    if findings_json.len() > MAX_SECTION_BYTES {
        tracing::debug!(
            "findings section truncated from {} bytes",
            findings_json.len()
        );
    }
    if records_json.len() > MAX_SECTION_BYTES {
        tracing::debug!("snapshot section truncated from {} bytes", records_json.len());
    }

    let parts = vec![
        PromptPart {
            text: format!("Page: {}", options.page_name),
        },
        PromptPart {
            text: HOUSE_RULES.to_string(),
        },
        PromptPart {
            text: "DETERMINISTIC_ISSUES:".to_string(),
        },
        PromptPart {
            text: truncate_utf8(&findings_json, MAX_SECTION_BYTES).to_string(),
        },
        PromptPart {
            text: "EXTRACTED_CONTEXT (truncated):".to_string(),
        },
        PromptPart {
            text: truncate_utf8(&records_json, MAX_SECTION_BYTES).to_string(),
        },
    ];

    Ok(ReviewRequest {
        messages: vec![PromptMessage {
            role: "user".to_string(),
            parts,
        }],
        model: DEFAULT_MODEL.to_string(),
    })
}

/// Truncate a string to at most `max` bytes without splitting a UTF-8
/// character.
#[must_use]
pub fn truncate_utf8(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_noop_within_budget() {
        assert_eq!(truncate_utf8("short", 100), "short");
        assert_eq!(truncate_utf8("exact", 5), "exact");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        // 'é' is two bytes; cutting at 3 would split the second one
        let s = "aéé";
        assert_eq!(truncate_utf8(s, 4), "aé");
        assert_eq!(truncate_utf8(s, 2), "a");
        assert!(truncate_utf8(s, 4).len() <= 4);
    }

    #[test]
    fn test_build_request_shape() {
        let options = PromptOptions {
            page_name: "Home".to_string(),
        };
        let request = build_review_request(&[], &[], &options).expect("should build");

        assert_eq!(request.model, DEFAULT_MODEL);
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, "user");

        let parts = &request.messages[0].parts;
        assert_eq!(parts.len(), 6);
        assert_eq!(parts[0].text, "Page: Home");
        assert!(parts[1].text.contains("KEY HOUSE RULES"));
        assert_eq!(parts[2].text, "DETERMINISTIC_ISSUES:");
        assert_eq!(parts[3].text, "[]");
        assert_eq!(parts[4].text, "EXTRACTED_CONTEXT (truncated):");
        assert_eq!(parts[5].text, "[]");
    }

    #[test]
    fn test_build_request_caps_section_size() {
        use audit_core::{NodeKind, NodeTree, VisualNode};

        let mut tree = NodeTree::new();
        for i in 0..500 {
            tree.insert(VisualNode::new(
                format!("1:{i}"),
                format!("Layer with a fairly long descriptive name {i}"),
                NodeKind::Other,
            ))
            .expect("insert");
        }
        let records = audit_core::extract(&tree);

        let request =
            build_review_request(&records, &[], &PromptOptions::default()).expect("should build");
        let snapshot_part = &request.messages[0].parts[5];
        assert!(snapshot_part.text.len() <= MAX_SECTION_BYTES);
    }

    #[test]
    fn test_with_model_override() {
        let request = build_review_request(&[], &[], &PromptOptions::default())
            .expect("should build")
            .with_model("gemini-1.5-flash");
        assert_eq!(request.model, "gemini-1.5-flash");
    }
}
