//! Struct definitions and implementations for [`PositionFix`] and
//! [`RoutePoint`].

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// A single reported device location, in degrees.
///
/// Consecutive fixes from a location stream are not guaranteed to be
/// distinct.
#[derive(Debug, PartialEq, Hash, Eq, Copy, Clone, Serialize, Deserialize)]
pub struct PositionFix {
    /// The latitude of the fix.
    pub latitude: OrderedFloat<f64>,

    /// The longitude of the fix.
    pub longitude: OrderedFloat<f64>,
}

impl PositionFix {
    /// Creates a fix from raw degrees. No validation is done here,
    /// see [`PositionFix::validate`].
    pub fn new(latitude: f64, longitude: f64) -> Self {
        PositionFix {
            latitude: OrderedFloat(latitude),
            longitude: OrderedFloat(longitude),
        }
    }

    /// Checks that both coordinates are finite numbers.
    pub fn validate(&self) -> Result<(), InvalidFixError> {
        if !self.latitude.into_inner().is_finite() {
            return Err(InvalidFixError::Latitude(self.latitude.into_inner()));
        }

        if !self.longitude.into_inner().is_finite() {
            return Err(InvalidFixError::Longitude(self.longitude.into_inner()));
        }

        Ok(())
    }
}

impl Display for PositionFix {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(
            f,
            "({:.6}, {:.6})",
            self.latitude.into_inner(),
            self.longitude.into_inner()
        )
    }
}

/// A [`PositionFix`] promoted into the simplified path.
#[derive(Debug, PartialEq, Hash, Eq, Copy, Clone, Serialize, Deserialize)]
pub struct RoutePoint {
    /// The promoted fix, unchanged.
    pub fix: PositionFix,

    /// Arrival index of the fix among all accepted fixes of the stream,
    /// starting at 0.
    pub index: u64,
}

/// A fix that can not be observed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum InvalidFixError {
    /// The latitude is NaN or infinite.
    Latitude(f64),

    /// The longitude is NaN or infinite.
    Longitude(f64),
}

impl Display for InvalidFixError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            InvalidFixError::Latitude(value) => write!(f, "Invalid latitude: {}.", value),
            InvalidFixError::Longitude(value) => write!(f, "Invalid longitude: {}.", value),
        }
    }
}

impl std::error::Error for InvalidFixError {}
