//! # Boundary Errors
//!
//! Error types of the construction/validity boundary.

use thiserror::Error;

use crate::index::{IndexError, IndexErrorCode};
use crate::input::ParseError;

use super::ffi::{STATUS_INVALID_QUERY, STATUS_PRECONDITION};

/// Result type for boundary operations
pub type BoundaryResult<T> = Result<T, BoundaryError>;

/// Why a handle could not produce an index.
///
/// Captured inside the handle, never raised by `init`.
#[derive(Debug, Error)]
pub enum InitError {
    /// Label file could not be read or parsed
    #[error("{0}")]
    Parse(#[from] ParseError),

    /// Labels were read but rejected by the index builder
    #[error("{0}")]
    Construction(#[from] IndexError),
}

impl InitError {
    /// Code of the wrapped error
    pub fn code(&self) -> &'static str {
        match self {
            InitError::Parse(e) => e.code().code(),
            InitError::Construction(e) => e.code().code(),
        }
    }
}

/// Errors returned by queries through a handle
#[derive(Debug, Clone, Error)]
pub enum BoundaryError {
    /// The handle failed during `init`; no index exists
    #[error("ELIM_PRECONDITION: handle is not good: {0}")]
    Precondition(String),

    /// Malformed query box or threshold
    #[error("{0}")]
    InvalidQuery(IndexError),
}

impl BoundaryError {
    pub fn code(&self) -> &'static str {
        match self {
            BoundaryError::Precondition(_) => "ELIM_PRECONDITION",
            BoundaryError::InvalidQuery(e) => e.code().code(),
        }
    }

    /// Status reported through the C interface
    pub fn status(&self) -> i32 {
        match self {
            BoundaryError::Precondition(_) => STATUS_PRECONDITION,
            BoundaryError::InvalidQuery(_) => STATUS_INVALID_QUERY,
        }
    }
}

impl From<IndexError> for BoundaryError {
    fn from(err: IndexError) -> Self {
        match err.code() {
            IndexErrorCode::InvalidQuery => BoundaryError::InvalidQuery(err),
            _ => BoundaryError::Precondition(err.to_string()),
        }
    }
}
