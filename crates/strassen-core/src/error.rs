//! Validation errors raised before any multiplication starts.

/// Error type for matrix construction and multiplication.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatrixError {
    /// A matrix is empty, ragged, not square, or cannot be split.
    #[error("matrix {name} has an invalid shape: {reason}")]
    Shape {
        /// Name of the offending matrix (e.g. "A").
        name: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Two operands that must share a dimension do not.
    #[error("size mismatch: {left}x{left} vs {right}x{right}")]
    SizeMismatch {
        /// Size of the left-hand operand.
        left: usize,
        /// Size of the right-hand operand.
        right: usize,
    },
}

impl MatrixError {
    pub(crate) fn shape(name: &str, reason: impl Into<String>) -> Self {
        Self::Shape {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
