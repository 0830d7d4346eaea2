//! The rank query engine.
//!
//! Pure functions over a [`RankRepository`]. Each query makes exactly one
//! repository call, so it observes a single snapshot. The only failure is a
//! repository fault; an empty result is a normal outcome.

use std::sync::Arc;

use crate::connections::derive_connections;
use crate::identifiers::RankIdentifier;
use crate::models::names::DestinationFilter;
use crate::models::traits::RankRepository;
use crate::models::types::*;

/// Query front-end shared by every request handler.
///
/// This type is cheap to clone.
#[derive(Clone)]
pub struct QueryEngine {
    repository: Arc<dyn RankRepository>,
}

impl QueryEngine {
    pub fn new(repository: Arc<dyn RankRepository>) -> Self {
        Self { repository }
    }

    /// Every rank, in repository order.
    pub fn find_all(&self) -> Result<Vec<Arc<Rank>>> {
        self.repository.all_ranks()
    }

    /// `None` when no rank has this id.
    pub fn find_by_id(&self, id: &RankIdentifier) -> Result<Option<Arc<Rank>>> {
        self.repository.get_rank(id)
    }

    /// Ranks inside the closed rectangle. No antimeridian handling.
    pub fn find_within_bounds(&self, bounds: &MapBounds) -> Result<Vec<Arc<Rank>>> {
        self.repository.ranks_within_bounds(bounds)
    }

    /// Ranks at most `radius_m` meters from `center`.
    pub fn find_nearby(&self, center: Coordinate, radius_m: f64) -> Result<Vec<Arc<Rank>>> {
        self.repository.ranks_near(center, radius_m)
    }

    /// Ranks with a route whose name contains `text`, ignoring case.
    ///
    /// There is no fallback for empty text; callers validate it.
    pub fn find_by_destination(&self, text: &str) -> Result<Vec<Arc<Rank>>> {
        let filter = DestinationFilter::new(text);
        Ok(self
            .repository
            .all_ranks()?
            .into_iter()
            .filter(|rank| filter.matches_rank(rank))
            .collect())
    }

    /// Ranks sharing a destination name with `id`. Empty when `id` is unknown.
    pub fn find_connections(&self, id: &RankIdentifier) -> Result<Vec<Connection>> {
        let snapshot = self.repository.all_ranks()?;
        Ok(derive_connections(&snapshot, id))
    }
}
