//! Error types for audit operations.

use thiserror::Error;

/// Result type for audit operations.
pub type AuditResult<T> = Result<T, AuditError>;

/// Errors that can occur in audit operations.
///
/// Per-node attribute resolution never errors; absent data only narrows
/// the output. These variants cover genuine contract violations and
/// serialization.
#[derive(Debug, Error)]
pub enum AuditError {
    /// A node with this ID is already in the tree.
    #[error("Duplicate node ID: {0}")]
    DuplicateNode(String),

    /// Node not found in the scan scope.
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    /// Tree or report serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
