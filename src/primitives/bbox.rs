//! Axis-aligned bounding boxes
//!
//! A point lies in a box if each coordinate is >= min and <= max of the
//! corresponding axis. All edges are inclusive.

use std::fmt;

use serde::Serialize;

use super::label::Label;

/// An axis aligned rectangle `[min_x, max_x] x [min_y, max_y]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BBox {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl BBox {
    /// Creates a box from its corners.
    ///
    /// No ordering check is done; see [`BBox::is_valid`].
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Creates a box only if it satisfies [`BBox::is_valid`].
    pub fn try_new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Option<Self> {
        let bbox = Self::new(min_x, min_y, max_x, max_y);
        bbox.is_valid().then_some(bbox)
    }

    /// Creates the inverted box that contains nothing.
    ///
    /// Expanding it with a label yields the point box of that label.
    pub fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    /// Creates the degenerate box of a single point.
    pub fn from_point(x: f64, y: f64) -> Self {
        Self::new(x, y, x, y)
    }

    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    /// True if no coordinate is NaN and min <= max on both axes.
    ///
    /// Degenerate boxes (points, lines) are valid.
    pub fn is_valid(&self) -> bool {
        !(self.min_x.is_nan() || self.min_y.is_nan() || self.max_x.is_nan() || self.max_y.is_nan())
            && self.min_x <= self.max_x
            && self.min_y <= self.max_y
    }

    /// True for the box produced by [`BBox::empty`] and other inverted boxes.
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// True if the box has zero extent on both axes.
    pub fn is_point(&self) -> bool {
        self.min_x == self.max_x && self.min_y == self.max_y
    }

    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    pub fn contains_label(&self, label: &Label) -> bool {
        self.contains_point(label.x(), label.y())
    }

    /// True if `other` lies completely inside this box.
    pub fn contains_bbox(&self, other: &BBox) -> bool {
        other.min_x >= self.min_x
            && other.max_x <= self.max_x
            && other.min_y >= self.min_y
            && other.max_y <= self.max_y
    }

    /// True if the two boxes share at least one point (touching edges count).
    pub fn intersects(&self, other: &BBox) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }

    /// Grows the box so that it contains the label.
    pub fn expand_to_label(&mut self, label: &Label) {
        self.min_x = self.min_x.min(label.x());
        self.min_y = self.min_y.min(label.y());
        self.max_x = self.max_x.max(label.x());
        self.max_y = self.max_y.max(label.y());
    }

    /// Grows the box so that it contains `other`.
    pub fn expand_to_bbox(&mut self, other: &BBox) {
        self.min_x = self.min_x.min(other.min_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_x = self.max_x.max(other.max_x);
        self.max_y = self.max_y.max(other.max_y);
    }

    /// Returns the smallest box containing both boxes.
    pub fn union(&self, other: &BBox) -> BBox {
        let mut result = *self;
        result.expand_to_bbox(other);
        result
    }

    /// Returns the tight box around a set of labels, or [`BBox::empty`].
    pub fn around<'a>(labels: impl IntoIterator<Item = &'a Label>) -> BBox {
        let mut result = BBox::empty();
        for label in labels {
            result.expand_to_label(label);
        }
        result
    }
}

impl fmt::Display for BBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BBox: [{}, {}] x [{}, {}]",
            self.min_x, self.max_x, self.min_y, self.max_y
        )
    }
}
