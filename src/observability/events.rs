//! Observable events
//!
//! Events are explicit and typed.

use std::fmt;

/// Observable events of the label index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration file loaded
    ConfigLoaded,

    // Input
    /// Label import started
    LabelImportBegin,
    /// Label import complete
    LabelImportComplete,
    /// Label import failed
    LabelImportFailed,

    // Index construction
    /// Index build started
    IndexBuildBegin,
    /// Index build complete
    IndexBuildComplete,
    /// Index build failed
    IndexBuildFailed,
    /// Coincident labels stored in one bucket leaf
    IndexBucketLeaf,

    // Handle lifecycle
    /// Handle produced a valid index
    HandleReady,
    /// Handle carries a failure
    HandleFailed,
    /// Handle released by its owner
    HandleReleased,

    // Queries
    /// Query answered
    QueryExecuted,
    /// Query rejected (bad input or failed handle)
    QueryRejected,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",

            Event::LabelImportBegin => "LABEL_IMPORT_BEGIN",
            Event::LabelImportComplete => "LABEL_IMPORT_COMPLETE",
            Event::LabelImportFailed => "LABEL_IMPORT_FAILED",

            Event::IndexBuildBegin => "INDEX_BUILD_BEGIN",
            Event::IndexBuildComplete => "INDEX_BUILD_COMPLETE",
            Event::IndexBuildFailed => "INDEX_BUILD_FAILED",
            Event::IndexBucketLeaf => "INDEX_BUCKET_LEAF",

            Event::HandleReady => "HANDLE_READY",
            Event::HandleFailed => "HANDLE_FAILED",
            Event::HandleReleased => "HANDLE_RELEASED",

            Event::QueryExecuted => "QUERY_COMPLETE",
            Event::QueryRejected => "QUERY_REJECTED",
        }
    }

    /// Returns true if this event reports a failure
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Event::LabelImportFailed
                | Event::IndexBuildFailed
                | Event::HandleFailed
                | Event::QueryRejected
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
