//! Record parser for c.e files
//!
//! A record line reads
//!
//! ```text
//! lat lon osm_id priority elimination_time label_length size_factor 'text'
//! ```
//!
//! The label length is checked to be numeric and then dropped; the index has
//! no use for it. Latitude becomes the y coordinate, longitude the x
//! coordinate.

use std::sync::OnceLock;

use regex::Regex;

use crate::primitives::Label;

use super::errors::{ParseError, ParseResult};

const NUMBER: &str = r"[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?";
const INTEGER: &str = r"[-+]?\d+";

/// Human readable description of a record, used in error messages
pub const RECORD_LAYOUT: &str =
    "lat lon osm_id priority elimination_time label_length size_factor 'text'";

fn record_regex() -> &'static Regex {
    static RECORD: OnceLock<Regex> = OnceLock::new();
    RECORD.get_or_init(|| {
        let pattern = format!(
            r"^\s*(?P<lat>{n})\s+(?P<lon>{n})\s+(?P<id>{i})\s+(?P<prio>{i})\s+(?P<t>{n})\s+(?P<len>{n})\s+(?P<fac>{n})\s+'(?P<text>.*)'\s*$",
            n = NUMBER,
            i = INTEGER,
        );
        Regex::new(&pattern).expect("record pattern is a valid regex")
    })
}

/// Check whether a line has the shape of a label record.
///
/// Only the shape is checked; value ranges are checked by [`parse_label`].
pub fn validate_label(line: &str) -> bool {
    record_regex().is_match(line)
}

/// Parse one record line into a label.
///
/// Errors carry no line number; the caller attaches it.
pub fn parse_label(line: &str) -> ParseResult<Label> {
    let fields = record_regex().captures(line).ok_or_else(|| {
        ParseError::malformed(format!(
            "record does not match '{}': {}",
            RECORD_LAYOUT,
            line.trim()
        ))
    })?;

    let y = parse_f64(&fields["lat"], "lat")?;
    let x = parse_f64(&fields["lon"], "lon")?;
    let id: i64 = fields["id"]
        .parse()
        .map_err(|e| ParseError::malformed(format!("osm_id '{}': {}", &fields["id"], e)))?;
    let priority: i32 = fields["prio"].parse().map_err(|e| {
        ParseError::malformed(format!("priority '{}': {}", &fields["prio"], e))
    })?;
    let elimination_time = parse_f64(&fields["t"], "elimination_time")?;
    parse_f64(&fields["len"], "label_length")?;
    let size_factor = parse_f64(&fields["fac"], "size_factor")?;

    if elimination_time < 0.0 {
        return Err(ParseError::negative_value("elimination_time", elimination_time));
    }
    if size_factor < 0.0 {
        return Err(ParseError::negative_value("size_factor", size_factor));
    }

    Ok(Label::new(
        id,
        x,
        y,
        elimination_time,
        size_factor,
        priority,
        &fields["text"],
    ))
}

/// Parse the count line at the top of a c.e file.
pub fn parse_count(line: &str) -> ParseResult<usize> {
    line.trim().parse().map_err(|_| {
        ParseError::malformed(format!(
            "expected the number of labels, found '{}'",
            line.trim()
        ))
    })
}

fn parse_f64(raw: &str, field: &str) -> ParseResult<f64> {
    let value: f64 = raw
        .parse()
        .map_err(|e| ParseError::malformed(format!("{} '{}': {}", field, raw, e)))?;
    if !value.is_finite() {
        return Err(ParseError::malformed(format!(
            "{} '{}' is not a finite number",
            field, raw
        )));
    }
    Ok(value)
}
