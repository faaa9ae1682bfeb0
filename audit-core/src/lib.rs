//! # A11y Audit Core
//!
//! Deterministic accessibility auditing for design-canvas node trees.
//! Pure, synchronous, and total over well-formed input: absent attributes
//! narrow the output, they never fail a scan.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 audit-core                  │
//! ├─────────────────────────────────────────────┤
//! │  Node Model      │  Contrast Math           │
//! │  - VisualNode    │  - sRGB linearization    │
//! │  - NodeTree      │  - Relative luminance    │
//! │  - Paints/fonts  │  - WCAG ratios           │
//! ├─────────────────────────────────────────────┤
//! │  Extractor       │  Rule Engine             │
//! │  - Flat snapshot │  - Contrast check        │
//! │  - Role          │  - Touch target          │
//! │    inference     │  - Links / headings      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Callers pass the scan scope explicitly as a [`NodeTree`]; the engine
//! never reaches into ambient host state. Output is plain structured data
//! for the caller's annotation and prompt layers.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod contrast;
pub mod error;
pub mod extract;
pub mod node;
pub mod rules;
pub mod scan;
pub mod tree;

pub use contrast::{contrast_ratio, is_large_text, linearize, relative_luminance};
pub use error::{AuditError, AuditResult};
pub use extract::{extract, infer_role, ExtractedNode, Role};
pub use node::{FontStyle, Geometry, NodeId, NodeKind, Paint, Rgb, VisualNode};
pub use rules::{
    check_contrast, check_heading_hierarchy, check_link_styling, check_touch_target, run_all,
    run_checks, run_checks_for, Finding, Severity,
};
pub use scan::{scan, ScanOptions, ScanReport};
pub use tree::NodeTree;

/// Audit core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
