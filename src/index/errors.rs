//! Index error types
//!
//! Error codes:
//! - ELIM_DUPLICATE_ID (construction)
//! - ELIM_INVALID_LABEL (construction)
//! - ELIM_RESOURCE_LIMIT (construction)
//! - ELIM_INVALID_QUERY (query)

use std::fmt;

use crate::primitives::{BBox, LabelId};

/// Index-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexErrorCode {
    /// Two labels share an id
    DuplicateId,
    /// Label with a non-finite position or an invalid time or size factor
    InvalidLabel,
    /// Label set larger than the configured limit
    ResourceLimit,
    /// Malformed query box or threshold
    InvalidQuery,
}

impl IndexErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            IndexErrorCode::DuplicateId => "ELIM_DUPLICATE_ID",
            IndexErrorCode::InvalidLabel => "ELIM_INVALID_LABEL",
            IndexErrorCode::ResourceLimit => "ELIM_RESOURCE_LIMIT",
            IndexErrorCode::InvalidQuery => "ELIM_INVALID_QUERY",
        }
    }

    /// True for the codes raised while building an index
    pub fn is_construction(&self) -> bool {
        !matches!(self, IndexErrorCode::InvalidQuery)
    }
}

impl fmt::Display for IndexErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Index error type with full context
#[derive(Debug, Clone)]
pub struct IndexError {
    /// Error code
    code: IndexErrorCode,
    /// Human-readable message
    message: String,
    /// Offending label, if one is to blame
    label_id: Option<LabelId>,
}

impl IndexError {
    /// Create a duplicate id error
    pub fn duplicate_id(id: LabelId) -> Self {
        Self {
            code: IndexErrorCode::DuplicateId,
            message: format!("label id {} occurs more than once", id),
            label_id: Some(id),
        }
    }

    /// Create an invalid label error
    pub fn invalid_label(id: LabelId, reason: impl Into<String>) -> Self {
        Self {
            code: IndexErrorCode::InvalidLabel,
            message: reason.into(),
            label_id: Some(id),
        }
    }

    /// Create a resource limit error
    pub fn resource_limit(count: usize, limit: usize) -> Self {
        Self {
            code: IndexErrorCode::ResourceLimit,
            message: format!("{} labels exceed the limit of {}", count, limit),
            label_id: None,
        }
    }

    /// Create an invalid query error
    pub fn invalid_query(reason: impl Into<String>) -> Self {
        Self {
            code: IndexErrorCode::InvalidQuery,
            message: reason.into(),
            label_id: None,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> IndexErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the offending label id if applicable
    pub fn label_id(&self) -> Option<LabelId> {
        self.label_id
    }
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for IndexError {}

/// Result type for index operations
pub type IndexResult<T> = Result<T, IndexError>;

/// Rejects boxes with NaN corners or min > max and NaN thresholds.
pub(crate) fn validate_query(bbox: &BBox, min_t: f64) -> IndexResult<()> {
    if min_t.is_nan() {
        return Err(IndexError::invalid_query("minimum elimination time is NaN"));
    }
    if !bbox.is_valid() {
        return Err(IndexError::invalid_query(format!(
            "bounding box must satisfy min <= max on both axes: {}",
            bbox
        )));
    }
    Ok(())
}
