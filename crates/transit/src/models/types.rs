//! Core data types for taxi ranks and their routes.

use std::sync::Arc;

use crate::identifiers::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Geometry
// ============================================================================

/// A WGS-84 coordinate in degrees.
///
/// Constructing one performs no range validation; NaN values fail every
/// spatial predicate. `StaticRankProvider::from_ranks` rejects finite
/// values outside the valid degree ranges.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// A closed latitude/longitude rectangle.
///
/// Bounds crossing the antimeridian (`southwest.longitude > northeast.longitude`)
/// are not unwrapped and match nothing.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MapBounds {
    pub northeast: Coordinate,
    pub southwest: Coordinate,
}

impl MapBounds {
    pub const fn new(northeast: Coordinate, southwest: Coordinate) -> Self {
        Self { northeast, southwest }
    }

    /// Inclusive on every edge.
    pub fn contains(&self, point: Coordinate) -> bool {
        point.latitude >= self.southwest.latitude
            && point.latitude <= self.northeast.latitude
            && point.longitude >= self.southwest.longitude
            && point.longitude <= self.northeast.longitude
    }

    /// True when both corners are finite and ordered southwest <= northeast.
    pub fn is_well_formed(&self) -> bool {
        self.northeast.is_finite()
            && self.southwest.is_finite()
            && self.southwest.latitude <= self.northeast.latitude
            && self.southwest.longitude <= self.northeast.longitude
    }
}

// ============================================================================
// Ranks and routes
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FareRange {
    pub min: f64,
    pub max: f64,
}

/// Opening and closing time as "HH:MM" strings, local time, no timezone.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OperatingHours {
    pub open: Arc<str>,
    pub close: Arc<str>,
}

/// A named destination served from a rank.
///
/// `waypoints` is the path shape if one is known; an empty list means the
/// shape is unavailable, not that the path has zero length.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Route {
    /// Unique within the owning rank only.
    pub id: RouteIdentifier,
    pub name: Arc<str>,
    pub coordinates: Coordinate,
    #[cfg_attr(feature = "serde", serde(default))]
    pub waypoints: Vec<Coordinate>,
    pub fare: f64,
}

/// Satellite pickup point belonging to a rank. Not separately queryable.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AdditionalLocation {
    pub name: Arc<str>,
    pub address: Arc<str>,
    pub coordinates: Coordinate,
}

/// A taxi rank: a fixed hub with one or more outbound routes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Rank {
    pub id: RankIdentifier,
    pub name: Arc<str>,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub location: Coordinate,
    pub address: Arc<str>,
    pub fare_range: FareRange,
    #[cfg_attr(feature = "serde", serde(default))]
    pub facilities: Vec<Arc<str>>,
    /// Display order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub routes: Vec<Route>,
    pub operating_hours: OperatingHours,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub contact_number: Option<Arc<str>>,
    pub rating: f64,
    pub number_of_ratings: u32,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub additional_locations: Option<Vec<AdditionalLocation>>,
}

impl Rank {
    pub fn route(&self, id: &RouteIdentifier) -> Option<&Route> {
        self.routes.iter().find(|route| &route.id == id)
    }
}

/// Another rank sharing at least one destination name with a queried rank.
///
/// Derived on demand, never stored.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Connection {
    pub rank_id: RankIdentifier,
    /// Route names as spelled by the connected rank, in its route order.
    pub destinations: Vec<Arc<str>>,
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum TransitError {
    #[error("Duplicate rank id: {0}")]
    DuplicateRank(RankIdentifier),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Rank store unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, TransitError>;
