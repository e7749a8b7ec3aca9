//! Geographic wrapper
//!
//! Adds coordinate range checks for longitude (x) and latitude (y) and
//! answers boxes that cross the antimeridian.

use crate::config::Config;
use crate::input::LabelStore;
use crate::primitives::{BBox, Label};

use super::errors::{IndexError, IndexResult};
use super::EliminationIndex;

const MIN_LON: f64 = -180.0;
const MAX_LON: f64 = 180.0;
const MIN_LAT: f64 = -90.0;
const MAX_LAT: f64 = 90.0;

/// An [`EliminationIndex`] over geographic coordinates.
#[derive(Debug, Clone)]
pub struct GeoIndex {
    inner: EliminationIndex,
}

impl GeoIndex {
    /// Build from a label store.
    ///
    /// # Errors
    /// `ELIM_INVALID_LABEL` for a label outside lon [-180, 180] or
    /// lat [-90, 90], plus every error of [`EliminationIndex::build`].
    pub fn build(store: LabelStore, config: &Config) -> IndexResult<Self> {
        Self::from_labels(store.into_labels(), config)
    }

    pub fn from_labels(labels: Vec<Label>, config: &Config) -> IndexResult<Self> {
        let world = BBox::new(MIN_LON, MIN_LAT, MAX_LON, MAX_LAT);
        if let Some(l) = labels.iter().find(|l| !world.contains_label(l)) {
            return Err(IndexError::invalid_label(
                l.id(),
                format!(
                    "label #{} at lon {} lat {} is outside the valid range",
                    l.id(),
                    l.x(),
                    l.y()
                ),
            ));
        }

        Ok(Self {
            inner: EliminationIndex::from_labels(labels, config)?,
        })
    }

    /// Labels inside `bbox` with an elimination time of at least `min_t`.
    ///
    /// A box with `min_x > max_x` wraps around the antimeridian: lon 170 to
    /// lon -170 covers [170, 180] and [-180, -170].
    ///
    /// # Errors
    /// `ELIM_INVALID_QUERY` for NaN values, min lat > max lat, or a corner
    /// outside the valid coordinate range.
    pub fn query(&self, bbox: &BBox, min_t: f64) -> IndexResult<Vec<&Label>> {
        check_range(bbox)?;

        if bbox.min_x() <= bbox.max_x() {
            return self.inner.query(bbox, min_t);
        }

        let east = BBox::new(bbox.min_x(), bbox.min_y(), MAX_LON, bbox.max_y());
        let west = BBox::new(MIN_LON, bbox.min_y(), bbox.max_x(), bbox.max_y());

        let mut result = self.inner.query(&east, min_t)?;
        result.extend(self.inner.query(&west, min_t)?);
        Ok(result)
    }

    /// The plain index below the wrapper.
    pub fn inner(&self) -> &EliminationIndex {
        &self.inner
    }

    pub fn into_inner(self) -> EliminationIndex {
        self.inner
    }
}

fn check_range(bbox: &BBox) -> IndexResult<()> {
    let lon_ok = |v: f64| (MIN_LON..=MAX_LON).contains(&v);
    let lat_ok = |v: f64| (MIN_LAT..=MAX_LAT).contains(&v);

    if !(lon_ok(bbox.min_x()) && lon_ok(bbox.max_x())) {
        return Err(IndexError::invalid_query(format!(
            "longitude out of range [-180, 180]: {}",
            bbox
        )));
    }
    if !(lat_ok(bbox.min_y()) && lat_ok(bbox.max_y())) {
        return Err(IndexError::invalid_query(format!(
            "latitude out of range [-90, 90]: {}",
            bbox
        )));
    }
    if bbox.min_y() > bbox.max_y() {
        return Err(IndexError::invalid_query(format!(
            "min latitude above max latitude: {}",
            bbox
        )));
    }
    Ok(())
}
