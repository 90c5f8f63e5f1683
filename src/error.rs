use thiserror::Error;

/// Error reported by a user supplied objective or constraint function.
pub type EvalError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error types for optimizers
#[derive(Debug, Error)]
pub enum MinimizerError {
    /// The objective function failed; the underlying error is kept as the source.
    #[error("objective function evaluation failed: {source}")]
    FunctionEvaluation {
        #[source]
        source: EvalError,
    },

    /// Constraint `index` failed; the underlying error is kept as the source.
    #[error("constraint {index} evaluation failed: {source}")]
    ConstraintEvaluation {
        index: usize,
        #[source]
        source: EvalError,
    },

    #[error("{what} dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        what: String,
        expected: usize,
        got: usize,
    },

    #[error("invalid dimension or empty vector")]
    InvalidDimension,

    #[error("invalid bounds at index {index}: [{lower}, {upper}]")]
    InvalidBounds { index: usize, lower: f64, upper: f64 },

    #[error("invalid initial simplex: expected {expected_rows}x{expected_cols}, got {rows}x{cols}")]
    InvalidInitialSimplex {
        expected_rows: usize,
        expected_cols: usize,
        rows: usize,
        cols: usize,
    },

    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

impl MinimizerError {
    pub(crate) fn mismatch(what: impl Into<String>, expected: usize, got: usize) -> Self {
        MinimizerError::DimensionMismatch {
            what: what.into(),
            expected,
            got,
        }
    }

    /// Returns `true` if a user function failed during the run.
    pub fn is_evaluation_error(&self) -> bool {
        matches!(
            self,
            MinimizerError::FunctionEvaluation { .. } | MinimizerError::ConstraintEvaluation { .. }
        )
    }

    /// Recover the error raised by the user function, if this is an evaluation failure.
    pub fn into_eval_error(self) -> Option<EvalError> {
        match self {
            MinimizerError::FunctionEvaluation { source }
            | MinimizerError::ConstraintEvaluation { source, .. } => Some(source),
            _ => None,
        }
    }
}
