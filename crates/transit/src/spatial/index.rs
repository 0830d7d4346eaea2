//! R-tree nodes for spatial indexing.
//!
//! ## Two-Stage Filtering
//!
//! Radius queries use a two-stage filtering approach:
//! 1. **R-tree filter**: an envelope lookup that is guaranteed to be a
//!    superset of the circle (see [`search_envelope`](super::queries::search_envelope))
//! 2. **Haversine filter**: the exact great-circle test on the survivors
//!
//! Bounds queries need only the first stage, since the envelope lookup is
//! already exact and inclusive for points.
//!
//! Every node remembers its position in the repository so results can be
//! returned in repository order rather than tree order.

use std::sync::Arc;

use rstar::{RTreeObject, AABB};

use crate::models::types::{MapBounds, Rank};

#[derive(Clone)]
pub struct RankNode {
    pub position: usize,
    pub rank: Arc<Rank>,
    point: [f64; 2],
}

impl RankNode {
    pub fn new(position: usize, rank: Arc<Rank>) -> Self {
        let point = [rank.location.longitude, rank.location.latitude];
        Self {
            position,
            rank,
            point,
        }
    }
}

impl RTreeObject for RankNode {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

/// Tree envelope for a well-formed rectangle, in (longitude, latitude) order.
pub fn bounds_envelope(bounds: &MapBounds) -> AABB<[f64; 2]> {
    AABB::from_corners(
        [bounds.southwest.longitude, bounds.southwest.latitude],
        [bounds.northeast.longitude, bounds.northeast.latitude],
    )
}
