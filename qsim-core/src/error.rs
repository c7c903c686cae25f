use thiserror::Error;

/// Error taxonomy for the simulation core. Every fallible operation in
/// `qsim-core` returns one of these variants; none are locally recovered,
/// all propagate to the caller of [`crate::Engine::run`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuantumError {
    #[error("qubit/basis/classical-bit index {index} out of range (limit {limit})")]
    RangeError { index: i64, limit: usize },

    #[error("gate/matrix tag-arity mismatch: {reason}")]
    KindError { reason: String },

    #[error("gate kind '{name}' is not implemented by this engine")]
    UnsupportedOp { name: String },

    #[error("array length mismatch: left={left}, right={right}")]
    ShapeError { left: usize, right: usize },

    #[error("state norm drift beyond tolerance: |sum - 1| = {drift:.3e}")]
    NormError { drift: f64 },

    #[error("slice body failed: {0}")]
    SweepError(Box<QuantumError>),

    #[error("run was cancelled")]
    CancelledError,

    #[error("no engine registered under id '{id}'")]
    NotFound { id: String },

    #[error("complex division by zero")]
    ArithmeticError,
}

pub type QuantumResult<T> = Result<T, QuantumError>;
