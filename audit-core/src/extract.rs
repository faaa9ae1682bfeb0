//! Flat snapshot extraction over a scan scope.
//!
//! Produces one record per node in pre-order, with inferred roles and
//! resolved colors, ready for serialization toward the language-model
//! collaborator. Extraction is total: unresolvable attributes stay absent
//! and never interrupt the walk.

use serde::{Deserialize, Serialize};

use crate::node::{FontStyle, NodeId, NodeKind, Rgb, VisualNode};
use crate::tree::NodeTree;

/// Maximum characters of text carried per snapshot record.
pub const MAX_TEXT_SNIPPET_CHARS: usize = 200;

/// Inferred semantic purpose of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// An actionable button.
    Button,
    /// A navigation link.
    Link,
    /// A heading.
    Heading,
    /// A form label.
    Label,
    /// A form input.
    Input,
    /// Imagery or decorative shape.
    Image,
    /// Anything else.
    Other,
}

/// Infer a node's role from its name and kind.
///
/// Rules are checked in fixed priority order against the lowercased name;
/// the first match wins. "Heading Button" is therefore a button.
#[must_use]
pub fn infer_role(node: &VisualNode) -> Role {
    let name = node.name.to_lowercase();
    if name.contains("button") || name.contains("btn") {
        return Role::Button;
    }
    if name.contains("link") {
        return Role::Link;
    }
    if name.starts_with("h1")
        || name.starts_with("h2")
        || name.starts_with("h3")
        || name.contains("heading")
    {
        return Role::Heading;
    }
    if name.contains("label") {
        return Role::Label;
    }
    if name.contains("input") || name.contains("field") || name.contains("textbox") {
        return Role::Input;
    }
    if name.contains("image")
        || matches!(
            node.kind,
            NodeKind::Rectangle | NodeKind::Ellipse | NodeKind::Vector
        )
    {
        return Role::Image;
    }
    Role::Other
}

/// One flat snapshot record describing a scanned node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedNode {
    /// Node identifier.
    pub id: NodeId,
    /// Layer name.
    pub name: String,
    /// Kind label, e.g. "text" or "frame".
    pub kind: String,
    /// Width in pixels, when the node has intrinsic size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    /// Height in pixels, when the node has intrinsic size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    /// Truncated text content, text nodes only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Font size in pixels, text nodes only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    /// Font family, text nodes only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// Whether the font style denotes bold, text nodes only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    /// First solid fill on the node itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fg: Option<Rgb>,
    /// Immediate parent's first solid fill, defaulting to white.
    pub bg: Rgb,
    /// Inferred semantic role.
    pub role: Role,
    /// Parent back-reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<NodeId>,
    /// Ordered child IDs, container kinds only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NodeId>>,
}

/// Extract a flat, order-preserving snapshot of the whole scope.
///
/// Records come out in pre-order; the sequence length equals the total
/// node count of the forest.
#[must_use]
pub fn extract(tree: &NodeTree) -> Vec<ExtractedNode> {
    tree.walk().map(|node| snapshot(tree, node)).collect()
}

fn snapshot(tree: &NodeTree, node: &VisualNode) -> ExtractedNode {
    let (text, font_size, font_family, bold) = match &node.kind {
        NodeKind::Text {
            content,
            font_size,
            font_family,
            font_style,
        } => (
            Some(content.chars().take(MAX_TEXT_SNIPPET_CHARS).collect()),
            *font_size,
            font_family.clone(),
            font_style.as_ref().map(FontStyle::is_bold),
        ),
        _ => (None, None, None, None),
    };

    ExtractedNode {
        id: node.id.clone(),
        name: node.name.clone(),
        kind: node.kind.label().to_string(),
        width: node.geometry.map(|g| g.width),
        height: node.geometry.map(|g| g.height),
        text,
        font_size,
        font_family,
        bold,
        fg: node.solid_fill(),
        bg: parent_background(tree, node),
        role: infer_role(node),
        parent: node.parent.clone(),
        children: node.kind.children().map(<[NodeId]>::to_vec),
    }
}

/// One-level background lookup: the immediate parent's first solid fill,
/// else white. The contrast rule walks the full ancestor chain instead;
/// the two paths are intentionally separate.
fn parent_background(tree: &NodeTree, node: &VisualNode) -> Rgb {
    node.parent
        .as_ref()
        .and_then(|id| tree.get(id))
        .and_then(VisualNode::solid_fill)
        .unwrap_or(Rgb::WHITE)
}
