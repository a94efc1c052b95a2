//! Error types for registry operations.

use thiserror::Error;

use crate::api::types::BodyId;

/// Result type for fallible registry calls.
pub type Result<T> = std::result::Result<T, OrreryError>;

/// Rejected creation requests. Nothing is created when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OrreryError {
    #[error("parent body not found: {0}")]
    InvalidParent(BodyId),

    #[error("invalid ring bounds: inner {inner} must be below outer {outer}")]
    InvalidRingBounds { inner: f64, outer: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_values() {
        let err = OrreryError::InvalidParent(BodyId(7));
        assert_eq!(err.to_string(), "parent body not found: body#7");

        let err = OrreryError::InvalidRingBounds { inner: 5.0, outer: 3.0 };
        assert!(err.to_string().contains("inner 5"));
        assert!(err.to_string().contains("outer 3"));
    }
}
