//! Error types
//!
//! Every fallible operation in the crate reports an [`AstError`]. Visitor
//! errors raised during a walk are not wrapped: they keep the visitor's own
//! error type and are handed back untouched.

use thiserror::Error;

/// Errors that can occur while building, copying or rendering an expression tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AstError {
    /// A literal duration such as `5m` could not be resolved
    #[error("invalid duration {input:?}: {reason}")]
    InvalidDuration { input: String, reason: String },

    /// A node violates the field invariants of its variant
    #[error("malformed {kind} node: {reason}")]
    MalformedNode { kind: &'static str, reason: String },
}

impl AstError {
    pub(crate) fn invalid_duration(input: &str, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        tracing::debug!(input, reason = %reason, "rejected duration literal");
        AstError::InvalidDuration {
            input: input.to_string(),
            reason,
        }
    }

    pub(crate) fn malformed(kind: &'static str, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        tracing::debug!(kind, reason = %reason, "malformed expression node");
        AstError::MalformedNode { kind, reason }
    }
}

/// Result type for tree operations
pub type AstResult<T> = Result<T, AstError>;
