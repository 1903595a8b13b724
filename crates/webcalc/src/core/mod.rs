//! Calculation engine: operator glyphs, parser, evaluator, input buffer
//! and the bounded history log.

pub mod buffer;
pub mod evaluator;
pub mod history;
mod operations;
pub mod parser;

pub use operations::{normalize_glyphs, Operation};

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// The two ways an evaluation can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Malformed expression, unbalanced grouping or unsupported token sequence
    InvalidSyntax,
    /// Result is NaN or infinite
    NonFinite,
}

/// Calculator error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// The expression could not be parsed
    #[error("Invalid expression: {0}")]
    InvalidSyntax(String),
    /// The expression parsed but produced NaN or an infinity
    #[error("Non-finite result: {0}")]
    NonFinite(f64),
}

impl CalcError {
    /// Creates a syntax error with the given detail
    #[must_use]
    pub fn syntax(detail: impl Into<String>) -> Self {
        Self::InvalidSyntax(detail.into())
    }

    /// Returns the failure classification
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::InvalidSyntax(_) => FailureKind::InvalidSyntax,
            Self::NonFinite(_) => FailureKind::NonFinite,
        }
    }
}
