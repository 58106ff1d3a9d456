//! The visible map area around the most recent fix.

use super::fix::PositionFix;
use serde::{Deserialize, Serialize};

/// Latitude span of the map around the current fix, in degrees.
pub const LATITUDE_DELTA: f64 = 0.00922;

/// Longitude span of the map around the current fix, in degrees.
pub const LONGITUDE_DELTA: f64 = 0.00421;

/// A rectangular map region centered on a location.
#[derive(Debug, PartialEq, Copy, Clone, Serialize, Deserialize)]
pub struct MapRegion {
    /// Latitude of the center.
    pub latitude: f64,

    /// Longitude of the center.
    pub longitude: f64,

    /// Latitude span.
    pub latitude_delta: f64,

    /// Longitude span.
    pub longitude_delta: f64,
}

impl MapRegion {
    /// Region centered on `fix` with the default zoom.
    pub fn around(fix: &PositionFix) -> Self {
        MapRegion {
            latitude: fix.latitude.into_inner(),
            longitude: fix.longitude.into_inner(),
            latitude_delta: LATITUDE_DELTA,
            longitude_delta: LONGITUDE_DELTA,
        }
    }
}
