//! Primitive geometric types
//!
//! - `Label`: a point label with elimination time and passthrough metadata
//! - `BBox`: an axis aligned, edge-inclusive rectangle

mod bbox;
mod label;

pub use bbox::BBox;
pub use label::{Axis, Label, LabelId};
