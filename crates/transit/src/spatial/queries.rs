//! Spatial query utilities for distance calculations.
//!
//! Uses the haversine formula on a sphere of fixed radius.

use std::f64::consts::FRAC_PI_2;

use crate::models::types::{Coordinate, MapBounds};

/// Earth radius used by every distance in the crate, in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Slack added to search envelopes so rounding never drops a boundary rank.
const ENVELOPE_MARGIN_DEG: f64 = 1e-6;

/// Great-circle distance between two coordinates in meters.
pub fn distance_meters(a: Coordinate, b: Coordinate) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let d_phi = (b.latitude - a.latitude).to_radians();
    let d_lambda = (b.longitude - a.longitude).to_radians();

    let h = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}

/// Lat/lng rectangle guaranteed to contain every point within `radius_m` of
/// `center`.
///
/// Returns `None` when no such rectangle exists without wrapping: the circle
/// reaches a pole or crosses the antimeridian, or the inputs are not finite.
/// Callers then fall back to a full scan. Stored longitudes are assumed to be
/// in [-180, 180].
pub fn search_envelope(center: Coordinate, radius_m: f64) -> Option<MapBounds> {
    if !center.is_finite() || !radius_m.is_finite() || radius_m < 0.0 {
        return None;
    }

    let angular = radius_m / EARTH_RADIUS_M;
    if angular >= FRAC_PI_2 {
        return None;
    }

    let d_lat = angular.to_degrees() + ENVELOPE_MARGIN_DEG;
    let min_lat = center.latitude - d_lat;
    let max_lat = center.latitude + d_lat;
    if min_lat <= -90.0 || max_lat >= 90.0 {
        return None;
    }

    // Within the band every cos(latitude) is at least cos(widest latitude),
    // which bounds the longitude offset of any point inside the circle.
    let widest = min_lat.abs().max(max_lat.abs()).to_radians();
    let ratio = (angular / 2.0).sin() / widest.cos();
    if ratio >= 1.0 {
        return None;
    }

    let d_lon = (2.0 * ratio.asin()).to_degrees() + ENVELOPE_MARGIN_DEG;
    let min_lon = center.longitude - d_lon;
    let max_lon = center.longitude + d_lon;
    if min_lon < -180.0 || max_lon > 180.0 {
        return None;
    }

    Some(MapBounds::new(
        Coordinate::new(max_lat, max_lon),
        Coordinate::new(min_lat, min_lon),
    ))
}
