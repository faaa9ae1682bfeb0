//! Deterministic accessibility checks.
//!
//! Four independent, side-effect-free checks per node. Each reads only the
//! target node and its ancestor chain; running them twice on the same
//! input yields identical findings.

use serde::{Deserialize, Serialize};

use crate::contrast::{
    contrast_ratio, is_large_text, BODY_TEXT_MIN_CONTRAST, LARGE_TEXT_MIN_CONTRAST,
};
use crate::error::AuditResult;
use crate::node::{NodeId, NodeKind, VisualNode};
use crate::tree::NodeTree;

/// Minimum touch target edge, in device-independent pixels.
pub const MIN_TOUCH_TARGET_PX: f32 = 24.0;

/// Urgency of a finding. Ordering follows urgency: errors sort first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A guideline violation.
    Error,
    /// A likely problem worth fixing.
    Warning,
    /// A reminder to verify manually.
    Info,
}

/// One deterministic accessibility issue detected for a node.
///
/// Findings are pure computed facts with no identity beyond their content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// The node this finding targets.
    pub target_id: NodeId,
    /// Name of the targeted node.
    pub node_name: String,
    /// Urgency.
    pub severity: Severity,
    /// Human-readable guideline citation.
    pub guideline: String,
    /// What was detected.
    pub summary: String,
    /// How to fix it.
    pub suggestion: String,
}

/// Check text contrast against WCAG 1.4.3.
///
/// Applies to text nodes with a resolvable foreground; the background is
/// the first solid fill up the ancestor chain, defaulting to white.
#[must_use]
pub fn check_contrast(tree: &NodeTree, node: &VisualNode) -> Vec<Finding> {
    let NodeKind::Text {
        font_size,
        font_style,
        ..
    } = &node.kind
    else {
        return Vec::new();
    };
    let Some(fg) = node.solid_fill() else {
        return Vec::new();
    };
    let bg = tree.background_of(node);

    let ratio = contrast_ratio(fg, bg);
    let large = is_large_text(*font_size, font_style.as_ref());
    let threshold = if large {
        LARGE_TEXT_MIN_CONTRAST
    } else {
        BODY_TEXT_MIN_CONTRAST
    };

    if ratio >= threshold {
        return Vec::new();
    }
    vec![Finding {
        target_id: node.id.clone(),
        node_name: node.name.clone(),
        severity: Severity::Error,
        guideline: if large {
            "WCAG 1.4.3 Contrast (Minimum): large text >= 3:1".to_string()
        } else {
            "WCAG 1.4.3 Contrast (Minimum): body text >= 4.5:1".to_string()
        },
        summary: format!("Low contrast: {ratio:.2}:1 (needs >= {threshold}:1)"),
        suggestion: "Increase foreground contrast or adjust the background color. Consider \
                     brand token variants with sufficient contrast."
            .to_string(),
    }]
}

/// Check interactive nodes for WCAG 2.5.8 minimum target size.
///
/// Applies to nodes named like buttons or links, and to reusable component
/// definitions and instances, when they expose a size.
#[must_use]
pub fn check_touch_target(node: &VisualNode) -> Vec<Finding> {
    let name = node.name.to_lowercase();
    let likely_interactive = name.contains("button")
        || name.contains("btn")
        || name.contains("link")
        || node.kind.is_reusable();
    if !likely_interactive {
        return Vec::new();
    }
    let Some(geometry) = node.geometry else {
        return Vec::new();
    };

    if geometry.width >= MIN_TOUCH_TARGET_PX && geometry.height >= MIN_TOUCH_TARGET_PX {
        return Vec::new();
    }
    vec![Finding {
        target_id: node.id.clone(),
        node_name: node.name.clone(),
        severity: Severity::Warning,
        guideline: "WCAG 2.5.8 Target Size (Minimum): at least 24x24px".to_string(),
        summary: format!(
            "Small touch target ({}×{}px).",
            geometry.width.round(),
            geometry.height.round()
        ),
        suggestion: "Increase the target to at least 24x24px and keep 8-16px spacing to \
                     adjacent targets."
            .to_string(),
    }]
}

/// Remind that link styling must not rely on color alone (WCAG 1.4.1).
///
/// Applies to text nodes named like links or whose content looks like a
/// URL.
#[must_use]
pub fn check_link_styling(node: &VisualNode) -> Vec<Finding> {
    let NodeKind::Text { content, .. } = &node.kind else {
        return Vec::new();
    };
    let name = node.name.to_lowercase();
    let text = content.to_lowercase();
    let looks_like_link = name.contains("link")
        || text.contains("http://")
        || text.contains("https://")
        || text.starts_with("www.");
    if !looks_like_link {
        return Vec::new();
    }
    vec![Finding {
        target_id: node.id.clone(),
        node_name: node.name.clone(),
        severity: Severity::Info,
        guideline: "WCAG 1.4.1 Use of Color: links must not rely on color alone".to_string(),
        summary: "Link styling should not rely on color alone.".to_string(),
        suggestion: "Underline links in body copy, or add another highly perceivable cue \
                     (for example a '>' marker in apps)."
            .to_string(),
    }]
}

/// Prompt verification of heading level and proximity (WCAG 2.4.6).
#[must_use]
pub fn check_heading_hierarchy(node: &VisualNode) -> Vec<Finding> {
    if !node.kind.is_text() {
        return Vec::new();
    }
    let name = node.name.to_lowercase();
    let is_heading = name.starts_with("h1")
        || name.starts_with("h2")
        || name.starts_with("h3")
        || name.contains("heading");
    if !is_heading {
        return Vec::new();
    }
    vec![Finding {
        target_id: node.id.clone(),
        node_name: node.name.clone(),
        severity: Severity::Info,
        guideline: "WCAG 2.4.6 Headings and Labels: maintain hierarchy and proximity"
            .to_string(),
        summary: "Confirm heading level and proximity reflect hierarchy.".to_string(),
        suggestion: "Match the heading level to its role (H1/H2/H3) and place it closer to \
                     its related content than to the preceding block."
            .to_string(),
    }]
}

/// Run all deterministic checks on one node.
///
/// Concatenation order is fixed: contrast, touch target, link styling,
/// heading hierarchy.
#[must_use]
pub fn run_checks(tree: &NodeTree, node: &VisualNode) -> Vec<Finding> {
    let mut findings = check_contrast(tree, node);
    findings.extend(check_touch_target(node));
    findings.extend(check_link_styling(node));
    findings.extend(check_heading_hierarchy(node));
    findings
}

/// Run all deterministic checks on the node with the given ID.
///
/// # Errors
///
/// Returns [`crate::AuditError::NodeNotFound`] if the ID is not in the
/// tree.
pub fn run_checks_for(tree: &NodeTree, id: &NodeId) -> AuditResult<Vec<Finding>> {
    Ok(run_checks(tree, tree.require(id)?))
}

/// Run all checks over every node of the tree, in pre-order.
#[must_use]
pub fn run_all(tree: &NodeTree) -> Vec<Finding> {
    let mut findings = Vec::new();
    for node in tree.walk() {
        let node_findings = run_checks(tree, node);
        for finding in &node_findings {
            tracing::debug!("{}: {}", finding.target_id, finding.summary);
        }
        findings.extend(node_findings);
    }
    findings
}
