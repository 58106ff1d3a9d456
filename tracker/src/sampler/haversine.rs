//! Implementation of the Haversine formula for calculating the distance
//! between two points on a sphere.
//!
//! See [Wikipedia](https://en.wikipedia.org/wiki/Haversine_formula) for
//! more.
//!
//! **Distance is returned in meters**.

use crate::types::PositionFix;
use std::f64::consts::PI;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

fn radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

/// Calculate the great-circle distance between two fixes.
///
/// # Notes
/// No special handling is done for the antimeridian or the poles, the
/// result is only used as a coarse displacement gate.
pub fn distance(start: &PositionFix, end: &PositionFix) -> f64 {
    let lat1 = radians(start.latitude.into_inner());
    let lat2 = radians(end.latitude.into_inner());
    let d_lat = lat2 - lat1;
    let d_lon = radians(end.longitude.into_inner()) - radians(start.longitude.into_inner());

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // rounding can push `a` past 1 near antipodes
    let a = a.min(1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}
