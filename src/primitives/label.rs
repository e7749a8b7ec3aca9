//! Point labels with an elimination time
//!
//! A label sits at a 2D position and is eliminated at time `t`. The larger
//! `t`, the longer the label survives generalization. The size factor,
//! priority and text are carried for callers and never interpreted here.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

/// Label identifier (the OSM id of the labelled object)
pub type LabelId = i64;

/// An immutable geolocated label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    id: LabelId,
    x: f64,
    y: f64,
    elimination_time: f64,
    size_factor: f64,
    priority: i32,
    text: String,
}

impl Label {
    /// Creates a label.
    ///
    /// Values are not validated here; the parser and the index builder
    /// reject negative or non-finite values.
    pub fn new(
        id: LabelId,
        x: f64,
        y: f64,
        elimination_time: f64,
        size_factor: f64,
        priority: i32,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id,
            x,
            y,
            elimination_time,
            size_factor,
            priority,
            text: text.into(),
        }
    }

    /// Shorthand for a label with unit size factor, zero priority and no text.
    pub fn point(id: LabelId, x: f64, y: f64, elimination_time: f64) -> Self {
        Self::new(id, x, y, elimination_time, 1.0, 0, "")
    }

    pub fn id(&self) -> LabelId {
        self.id
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Returns the coordinate on the given axis.
    pub fn coord(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    pub fn elimination_time(&self) -> f64 {
        self.elimination_time
    }

    pub fn size_factor(&self) -> f64 {
        self.size_factor
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Checks the numeric invariants of a stored label.
    ///
    /// Returns a description of the first violation.
    pub fn check_values(&self) -> Result<(), String> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(format!(
                "label #{} has a non-finite position ({}, {})",
                self.id, self.x, self.y
            ));
        }
        if !self.elimination_time.is_finite() || self.elimination_time < 0.0 {
            return Err(format!(
                "label #{} has an invalid elimination time {}",
                self.id, self.elimination_time
            ));
        }
        if !self.size_factor.is_finite() || self.size_factor < 0.0 {
            return Err(format!(
                "label #{} has an invalid size factor {}",
                self.id, self.size_factor
            ));
        }
        Ok(())
    }

    /// Orders two labels by elimination time.
    pub fn order_t(first: &Self, second: &Self) -> Ordering {
        first.elimination_time.total_cmp(&second.elimination_time)
    }

    /// Orders two labels by their coordinate on `axis`.
    pub fn order_on(axis: Axis, first: &Self, second: &Self) -> Ordering {
        first.coord(axis).total_cmp(&second.coord(axis))
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Label [#{}]: '{}' at ({}, {}) with prio {}, elim-t: {} and label factor: {}",
            self.id, self.text, self.x, self.y, self.priority, self.elimination_time, self.size_factor
        )
    }
}

/// Split axis of the k-d partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// The axis used one level further down.
    pub fn flip(self) -> Self {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let l = Label::new(1234567, 90.0, 45.0, 0.9, 1.5, 16, "Test");

        assert_eq!(l.id(), 1234567);
        assert_eq!(l.x(), 90.0);
        assert_eq!(l.y(), 45.0);
        assert_eq!(l.elimination_time(), 0.9);
        assert_eq!(l.size_factor(), 1.5);
        assert_eq!(l.priority(), 16);
        assert_eq!(l.text(), "Test");
        assert_eq!(l.coord(Axis::X), 90.0);
        assert_eq!(l.coord(Axis::Y), 45.0);
    }

    #[test]
    fn test_order_t() {
        let p1 = Label::point(1, 90.0, 90.0, 0.9);
        let p2 = Label::point(2, 90.0, 90.0, 0.8);
        let p3 = Label::point(3, 90.0, 90.0, 0.8);

        assert_eq!(Label::order_t(&p1, &p2), Ordering::Greater);
        assert_eq!(Label::order_t(&p2, &p1), Ordering::Less);
        assert_eq!(Label::order_t(&p2, &p3), Ordering::Equal);
    }

    #[test]
    fn test_order_on_axis() {
        let a = Label::point(1, 1.0, 5.0, 1.0);
        let b = Label::point(2, 2.0, 4.0, 1.0);

        assert_eq!(Label::order_on(Axis::X, &a, &b), Ordering::Less);
        assert_eq!(Label::order_on(Axis::Y, &a, &b), Ordering::Greater);
    }

    #[test]
    fn test_check_values() {
        assert!(Label::point(1, 0.0, 0.0, 0.0).check_values().is_ok());
        assert!(Label::point(1, f64::NAN, 0.0, 1.0).check_values().is_err());
        assert!(Label::point(1, 0.0, f64::INFINITY, 1.0).check_values().is_err());
        assert!(Label::point(1, 0.0, 0.0, -1.0).check_values().is_err());
        assert!(Label::new(1, 0.0, 0.0, 1.0, -0.5, 0, "").check_values().is_err());
    }

    #[test]
    fn test_display() {
        let l = Label::new(1, 1.0, 2.0, 10.0, 1.5, 1, "T1");
        assert_eq!(
            l.to_string(),
            "Label [#1]: 'T1' at (1, 2) with prio 1, elim-t: 10 and label factor: 1.5"
        );
    }

    #[test]
    fn test_axis_flip() {
        assert_eq!(Axis::X.flip(), Axis::Y);
        assert_eq!(Axis::Y.flip(), Axis::X);
    }
}
