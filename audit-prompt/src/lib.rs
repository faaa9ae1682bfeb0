//! # A11y Audit Prompt
//!
//! Request and response plumbing between the audit core and a hosted
//! language-model collaborator.
//!
//! This crate composes the size-bounded review request payload and decodes
//! the model's JSON review. No transport lives here: the caller owns the
//! HTTP boundary and hands back the model's raw text.
//!
//! ## Flow
//!
//! ```text
//! ScanReport ──> build_review_request ──> ReviewRequest (JSON body)
//!                                              │  caller's proxy call
//! ModelReview <── parse_review <────────── raw model text
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod prompt;
pub mod response;

pub use prompt::{
    build_review_request, truncate_utf8, PromptMessage, PromptOptions, PromptPart, ReviewRequest,
};
pub use response::{parse_review, Annotation, Evidence, ModelReview};

use thiserror::Error;

/// Errors from prompt composition or response decoding.
#[derive(Debug, Error)]
pub enum PromptError {
    /// Payload serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The model response contained no parseable JSON object.
    #[error("model response did not contain a valid JSON object")]
    MalformedResponse,
}
