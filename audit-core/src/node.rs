//! Visual nodes - the elements of a scanned design tree.

use serde::{Deserialize, Serialize};

/// Minimum numeric font weight treated as bold.
pub const BOLD_WEIGHT_MIN: u16 = 700;

/// Unique identifier for a node within one scan.
///
/// Ids are assigned by the host document, not generated here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(String);

impl NodeId {
    /// Create a node ID from a host-assigned string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A resolved solid color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Opaque white, the default background.
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Create a color from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// One fill of a node's paint list.
///
/// Only the first solid entry is ever considered; other paint types are
/// carried so callers can round-trip a document without losing them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Paint {
    /// A solid color fill.
    Solid {
        /// Fill color.
        color: Rgb,
    },
    /// A gradient fill (never resolved to a color).
    Gradient,
    /// An image fill (never resolved to a color).
    Image,
}

/// Font style as reported by the host: a named style or a numeric weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FontStyle {
    /// Numeric weight (100-900).
    Weight(u16),
    /// Named style, e.g. "Regular" or "Bold Italic".
    Named(String),
}

impl FontStyle {
    /// Whether this style denotes bold text.
    ///
    /// A numeric weight of 700 or more, or a name containing "bold" in any
    /// casing, counts as bold.
    #[must_use]
    pub fn is_bold(&self) -> bool {
        match self {
            Self::Weight(weight) => *weight >= BOLD_WEIGHT_MIN,
            Self::Named(name) => name.to_lowercase().contains("bold"),
        }
    }
}

/// Intrinsic size of a node, in device-independent pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

/// The category of a node, with kind-specific payload.
///
/// Text carries its content and font attributes; container kinds own an
/// ordered child list. Font attributes are individually optional since the
/// host may fail to resolve them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeKind {
    /// A text layer.
    Text {
        /// Raw text content.
        content: String,
        /// Font size in pixels.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        font_size: Option<f32>,
        /// Font family name.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        font_family: Option<String>,
        /// Font style or numeric weight.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        font_style: Option<FontStyle>,
    },

    /// A rectangle shape.
    Rectangle,

    /// An ellipse shape.
    Ellipse,

    /// A vector shape.
    Vector,

    /// A frame-like layout container.
    Frame {
        /// Ordered child node IDs.
        children: Vec<NodeId>,
    },

    /// A loose grouping of nodes.
    Group {
        /// Ordered child node IDs.
        children: Vec<NodeId>,
    },

    /// A reusable component definition.
    Component {
        /// Ordered child node IDs.
        children: Vec<NodeId>,
    },

    /// An instance of a reusable component.
    Instance {
        /// Ordered child node IDs.
        children: Vec<NodeId>,
    },

    /// Any other host node category.
    Other,
}

impl NodeKind {
    /// Lowercase label for this kind, as carried in snapshot records.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Rectangle => "rectangle",
            Self::Ellipse => "ellipse",
            Self::Vector => "vector",
            Self::Frame { .. } => "frame",
            Self::Group { .. } => "group",
            Self::Component { .. } => "component",
            Self::Instance { .. } => "instance",
            Self::Other => "other",
        }
    }

    /// Child IDs for container kinds, `None` for leaf kinds.
    #[must_use]
    pub fn children(&self) -> Option<&[NodeId]> {
        match self {
            Self::Frame { children }
            | Self::Group { children }
            | Self::Component { children }
            | Self::Instance { children } => Some(children.as_slice()),
            _ => None,
        }
    }

    /// Whether this is a text kind.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text { .. })
    }

    /// Whether this is a reusable component definition or instance.
    #[must_use]
    pub const fn is_reusable(&self) -> bool {
        matches!(self, Self::Component { .. } | Self::Instance { .. })
    }
}

/// One element of a scanned design tree.
///
/// Nodes are constructed fresh from the host document at scan time and
/// never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualNode {
    /// Host-assigned identifier, unique within the scan.
    pub id: NodeId,
    /// Free-text layer name, used for role heuristics.
    pub name: String,
    /// Node category with kind-specific payload.
    pub kind: NodeKind,
    /// Intrinsic size, absent for nodes without one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Geometry>,
    /// Ordered paint list; may be empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fills: Vec<Paint>,
    /// Weak back-reference to the parent node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<NodeId>,
}

impl VisualNode {
    /// Create a node with the given identity and kind.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: NodeId::new(id),
            name: name.into(),
            kind,
            geometry: None,
            fills: Vec::new(),
            parent: None,
        }
    }

    /// Set the intrinsic size.
    #[must_use]
    pub fn with_geometry(mut self, width: f32, height: f32) -> Self {
        self.geometry = Some(Geometry { width, height });
        self
    }

    /// Append a fill.
    #[must_use]
    pub fn with_fill(mut self, paint: Paint) -> Self {
        self.fills.push(paint);
        self
    }

    /// Set the parent back-reference.
    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(NodeId::new(parent));
        self
    }

    /// The first solid fill of this node, if any.
    #[must_use]
    pub fn solid_fill(&self) -> Option<Rgb> {
        self.fills.iter().find_map(|paint| match paint {
            Paint::Solid { color } => Some(*color),
            _ => None,
        })
    }

    /// Ordered child IDs; empty for leaf kinds.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        self.kind.children().unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_fill_skips_non_solid_paints() {
        let node = VisualNode::new("1:1", "Card", NodeKind::Rectangle)
            .with_fill(Paint::Gradient)
            .with_fill(Paint::Solid {
                color: Rgb::new(10, 20, 30),
            })
            .with_fill(Paint::Solid { color: Rgb::BLACK });

        assert_eq!(node.solid_fill(), Some(Rgb::new(10, 20, 30)));
    }

    #[test]
    fn test_solid_fill_absent() {
        let node = VisualNode::new("1:2", "Icon", NodeKind::Vector).with_fill(Paint::Image);
        assert_eq!(node.solid_fill(), None);

        let bare = VisualNode::new("1:3", "Spacer", NodeKind::Other);
        assert_eq!(bare.solid_fill(), None);
    }

    #[test]
    fn test_bold_detection() {
        assert!(FontStyle::Named("Bold".to_string()).is_bold());
        assert!(FontStyle::Named("Semi Bold Italic".to_string()).is_bold());
        assert!(FontStyle::Named("BOLD".to_string()).is_bold());
        assert!(!FontStyle::Named("Regular".to_string()).is_bold());
        assert!(FontStyle::Weight(700).is_bold());
        assert!(FontStyle::Weight(900).is_bold());
        assert!(!FontStyle::Weight(699).is_bold());
    }

    #[test]
    fn test_kind_capabilities() {
        let frame = NodeKind::Frame {
            children: vec![NodeId::from("2:1")],
        };
        assert_eq!(frame.children().map(<[NodeId]>::len), Some(1));
        assert_eq!(frame.label(), "frame");
        assert!(!frame.is_text());

        let text = NodeKind::Text {
            content: "hi".to_string(),
            font_size: None,
            font_family: None,
            font_style: None,
        };
        assert!(text.is_text());
        assert!(text.children().is_none());

        assert!(NodeKind::Instance { children: vec![] }.is_reusable());
        assert!(NodeKind::Component { children: vec![] }.is_reusable());
        assert!(!NodeKind::Rectangle.is_reusable());
    }

    #[test]
    fn test_font_style_serde_forms() {
        let named: FontStyle = serde_json::from_str("\"Bold\"").expect("should parse");
        assert_eq!(named, FontStyle::Named("Bold".to_string()));

        let weight: FontStyle = serde_json::from_str("700").expect("should parse");
        assert_eq!(weight, FontStyle::Weight(700));
    }
}
