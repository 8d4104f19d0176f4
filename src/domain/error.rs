//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the hierarchy contract.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("unknown node: {0}")]
    UnknownNode(String),

    #[error("duplicate node id: {0}")]
    DuplicateId(String),

    #[error("node {id} references unknown parent: {parent}")]
    UnknownParent { id: String, parent: String },

    #[error("cycle detected in hierarchy: {0}")]
    CycleDetected(String),

    #[error("invalid hierarchy document: {message}")]
    InvalidDocument { message: String },
}

/// Result type for hierarchy operations.
pub type TreeResult<T> = Result<T, DomainError>;
