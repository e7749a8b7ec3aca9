//! elimination_index - geolocated labels queried by bounding box and
//! elimination time
//!
//! A label disappears from the map once the zoom-dependent elimination time
//! passes. The index answers "all labels inside this box that are still
//! visible at time t" without scanning every label.
//!
//! - `input`: c.e file import
//! - `index`: augmented k-d tree, geographic wrapper
//! - `boundary`: owning handle and C interface
//! - `config`, `observability`: limits, logging, metrics

pub mod boundary;
pub mod cli;
pub mod config;
pub mod index;
pub mod input;
pub mod observability;
pub mod primitives;
