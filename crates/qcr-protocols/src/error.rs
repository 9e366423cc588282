//! Error types for the protocol builders.

use qcr_ir::IrError;
use thiserror::Error;

/// Errors raised while assembling a protocol circuit.
///
/// Builders check their arguments before emitting any instruction, so an
/// error never comes with a partially built circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// A builder argument is out of range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The circuit layer rejected an instruction.
    #[error("Circuit error: {0}")]
    Ir(#[from] IrError),
}

impl ProtocolError {
    /// Whether this is an argument validation failure.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, ProtocolError::InvalidArgument(_))
    }
}

/// Result type for protocol builders.
pub type ProtocolResult<T> = Result<T, ProtocolError>;
