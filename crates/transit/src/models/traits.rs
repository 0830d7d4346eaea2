//! The repository seam.
//!
//! The query engine and connection deriver only ever see a `RankRepository`.
//! Implementations can be in-memory, database-backed, or remote.

use std::sync::Arc;

use crate::identifiers::RankIdentifier;
use crate::models::types::*;
use crate::spatial::queries::distance_meters;

/// Read access to the set of ranks.
///
/// Every method call must observe one consistent snapshot of the store. Two
/// separate calls may observe different snapshots.
pub trait RankRepository: Send + Sync {
    /// All ranks in repository order.
    fn all_ranks(&self) -> Result<Vec<Arc<Rank>>>;

    fn get_rank(&self, id: &RankIdentifier) -> Result<Option<Arc<Rank>>>;

    // ---- Spatial queries ----
    //
    // Overrides may use an index, but must return exactly the same ranks in
    // repository order as the scans below, for every rank whose coordinates
    // are non-finite or within [-90, 90] x [-180, 180].

    /// Ranks inside the closed rectangle.
    fn ranks_within_bounds(&self, bounds: &MapBounds) -> Result<Vec<Arc<Rank>>> {
        Ok(self
            .all_ranks()?
            .into_iter()
            .filter(|rank| bounds.contains(rank.location))
            .collect())
    }

    /// Ranks whose great-circle distance to `center` is at most `radius_m`.
    fn ranks_near(&self, center: Coordinate, radius_m: f64) -> Result<Vec<Arc<Rank>>> {
        Ok(self
            .all_ranks()?
            .into_iter()
            .filter(|rank| distance_meters(center, rank.location) <= radius_m)
            .collect())
    }
}
