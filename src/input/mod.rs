//! Label input subsystem
//!
//! Reads c.e files into an immutable [`LabelStore`].
//!
//! # Guarantees
//!
//! - The first malformed record aborts the import; no partial store escapes.
//! - Every record-level error carries its 1-based line number.
//! - A source without any line is a valid, empty store.

mod errors;
mod parse;
mod store;

pub use errors::{ParseError, ParseErrorCode, ParseResult};
pub use parse::{parse_count, parse_label, validate_label, RECORD_LAYOUT};
pub use store::{import_labels, read_labels, LabelStore};
