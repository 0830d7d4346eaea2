//! Rank store whose data set can be replaced while queries are running.
//!
//! Each repository call clones the current `Arc` under a short read lock and
//! then works on that snapshot alone, so a concurrent [`replace`] is never
//! observed halfway through a call.
//!
//! [`replace`]: SnapshotRankRepository::replace

use std::sync::Arc;

use parking_lot::RwLock;

use crate::identifiers::RankIdentifier;
use crate::models::{traits::RankRepository, types::*};
use crate::provider::static_provider::StaticRankProvider;

pub struct SnapshotRankRepository {
    current: RwLock<Arc<StaticRankProvider>>,
}

impl SnapshotRankRepository {
    pub fn new(provider: StaticRankProvider) -> Self {
        Self {
            current: RwLock::new(Arc::new(provider)),
        }
    }

    /// The snapshot subsequent calls will read, until the next replace.
    pub fn snapshot(&self) -> Arc<StaticRankProvider> {
        self.current.read().clone()
    }

    /// Swap in a new data set. Calls already running keep their old snapshot.
    pub fn replace(&self, ranks: Vec<Rank>) -> Result<()> {
        let provider = StaticRankProvider::from_ranks(ranks)?;
        let count = provider.len();
        *self.current.write() = Arc::new(provider);
        tracing::info!(ranks = count, "replaced rank snapshot");
        Ok(())
    }
}

impl RankRepository for SnapshotRankRepository {
    fn all_ranks(&self) -> Result<Vec<Arc<Rank>>> {
        self.snapshot().all_ranks()
    }

    fn get_rank(&self, id: &RankIdentifier) -> Result<Option<Arc<Rank>>> {
        self.snapshot().get_rank(id)
    }

    fn ranks_within_bounds(&self, bounds: &MapBounds) -> Result<Vec<Arc<Rank>>> {
        self.snapshot().ranks_within_bounds(bounds)
    }

    fn ranks_near(&self, center: Coordinate, radius_m: f64) -> Result<Vec<Arc<Rank>>> {
        self.snapshot().ranks_near(center, radius_m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::fixture::rank_at;

    #[test]
    fn test_replace_swaps_whole_data_set() {
        let repo = SnapshotRankRepository::new(
            StaticRankProvider::from_ranks(vec![rank_at("a", -26.1, 28.1, &[])]).unwrap(),
        );
        let before = repo.snapshot();

        repo.replace(vec![rank_at("b", -26.2, 28.0, &[]), rank_at("c", -26.3, 28.0, &[])])
            .unwrap();

        // The old snapshot is untouched.
        assert_eq!(before.len(), 1);
        assert!(before.get_rank(&RankIdentifier::new("a")).unwrap().is_some());

        assert_eq!(repo.all_ranks().unwrap().len(), 2);
        assert!(repo.get_rank(&RankIdentifier::new("a")).unwrap().is_none());
    }

    #[test]
    fn test_failed_replace_keeps_current_data() {
        let repo = SnapshotRankRepository::new(
            StaticRankProvider::from_ranks(vec![rank_at("a", -26.1, 28.1, &[])]).unwrap(),
        );

        let result = repo.replace(vec![rank_at("x", 0.0, 0.0, &[]), rank_at("x", 1.0, 1.0, &[])]);
        assert!(result.is_err());
        assert!(repo.get_rank(&RankIdentifier::new("a")).unwrap().is_some());
    }
}
