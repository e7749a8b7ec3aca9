//! Construction/validity boundary
//!
//! Hosts hold an index through a handle: `init` never fails loudly, `is_good`
//! tells whether an index exists, queries against a failed handle are
//! rejected, and `release` frees everything.
//!
//! Two faces of the same contract:
//!
//! - [`IndexHandle`] for Rust callers
//! - [`ffi`] for C callers (`init`, `is_good`, `get_data`, `release`)

mod errors;
pub mod ffi;
mod handle;

pub use errors::{BoundaryError, BoundaryResult, InitError};
pub use handle::{HandleState, IndexHandle};
