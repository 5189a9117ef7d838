//! Error taxonomy of the polynomial and piecewise engines.
//!
//! Every fallible public operation returns `Result<T, PolyError>`. Errors are raised at the point
//! where an invariant is violated and handed to the caller unchanged.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PolyError {
    /// invalid interval, bad variable name or nesting order, unparseable expression,
    /// inconsistent list of pieces
    #[error("construction error: {0}")]
    Construction(String),
    /// operand kind not accepted by the operation
    #[error("type mismatch: {0}")]
    TypeMismatch(String),
    /// operation undefined for the given arguments (division by zero, composition with a
    /// polynomial of degree >= 2, ...)
    #[error("domain error: {0}")]
    Domain(String),
}

impl PolyError {
    pub fn construction(msg: impl Into<String>) -> Self {
        PolyError::Construction(msg.into())
    }

    pub fn type_mismatch(msg: impl Into<String>) -> Self {
        PolyError::TypeMismatch(msg.into())
    }

    pub fn domain(msg: impl Into<String>) -> Self {
        PolyError::Domain(msg.into())
    }
}

pub type PolyResult<T> = Result<T, PolyError>;
