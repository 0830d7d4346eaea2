use rutpoint_transit::{Coordinate, MapBounds};
use serde::{Deserialize, Serialize};

/// Visible map region as reported by the map host: a center and the full
/// latitude/longitude extent in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl Viewport {
    pub fn centered(center: Coordinate, latitude_delta: f64, longitude_delta: f64) -> Self {
        Self {
            latitude: center.latitude,
            longitude: center.longitude,
            latitude_delta,
            longitude_delta,
        }
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    pub fn to_bounds(&self) -> MapBounds {
        let half_lat = self.latitude_delta / 2.0;
        let half_lng = self.longitude_delta / 2.0;
        MapBounds::new(
            Coordinate::new(self.latitude + half_lat, self.longitude + half_lng),
            Coordinate::new(self.latitude - half_lat, self.longitude - half_lng),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SignificanceThresholds {
    /// Relative span change that counts as a zoom
    pub span_ratio: f64,
    /// Center shift, as a fraction of the previous span, that counts as a pan
    pub center_ratio: f64,
}

impl Default for SignificanceThresholds {
    fn default() -> Self {
        Self {
            span_ratio: 0.2,
            center_ratio: 0.5,
        }
    }
}

/// Whether `next` differs enough from the last queried viewport to refetch.
///
/// With nothing queried yet every viewport is significant.
pub fn is_significant_change(
    previous: Option<&Viewport>,
    next: &Viewport,
    thresholds: &SignificanceThresholds,
) -> bool {
    let Some(previous) = previous else {
        return true;
    };

    let zoomed = relative_change(previous.latitude_delta, next.latitude_delta) > thresholds.span_ratio
        || relative_change(previous.longitude_delta, next.longitude_delta) > thresholds.span_ratio;

    let panned = (next.latitude - previous.latitude).abs()
        > previous.latitude_delta * thresholds.center_ratio
        || (next.longitude - previous.longitude).abs()
            > previous.longitude_delta * thresholds.center_ratio;

    zoomed || panned
}

// A zero previous span makes any change infinite, and no change NaN (not significant).
fn relative_change(previous: f64, next: f64) -> f64 {
    (previous - next).abs() / previous
}
