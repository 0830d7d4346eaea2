//! In-memory rank provider with a spatial index.
//!
//! Stores every rank once behind an `Arc`, with an id map for lookups and an
//! R-tree over rank coordinates for bounds and radius queries.

use std::collections::HashMap;
use std::sync::Arc;

use rstar::RTree;

use crate::identifiers::RankIdentifier;
use crate::models::{traits::RankRepository, types::*};
use crate::spatial::index::{bounds_envelope, RankNode};
use crate::spatial::queries::{distance_meters, search_envelope};

/// Immutable in-memory rank repository.
///
/// This type is cheap to clone since all data is stored in `Arc`s.
#[derive(Clone)]
pub struct StaticRankProvider {
    // Core data, in repository order
    ranks: Vec<Arc<Rank>>,

    // Lookup map
    rank_map: HashMap<RankIdentifier, Arc<Rank>>,

    // Spatial index over ranks with finite coordinates
    rank_tree: RTree<RankNode>,
}

impl StaticRankProvider {
    /// Create a new empty provider
    pub fn new() -> Self {
        Self {
            ranks: Vec::new(),
            rank_map: HashMap::new(),
            rank_tree: RTree::new(),
        }
    }

    /// Build a provider from ranks in repository order.
    ///
    /// Fails if two ranks share an id, or if a rank has finite coordinates
    /// outside [-90, 90] x [-180, 180]. The index cannot see wrapped longitudes
    /// that the haversine scan would accept.
    pub fn from_ranks(ranks: Vec<Rank>) -> Result<Self> {
        if let Some(rank) = ranks.iter().find(|rank| out_of_range(rank.location)) {
            return Err(TransitError::InvalidData(format!(
                "rank {} has coordinates out of range: {}, {}",
                rank.id, rank.location.latitude, rank.location.longitude
            )));
        }

        let ranks: Vec<Arc<Rank>> = ranks.into_iter().map(Arc::new).collect();

        let mut rank_map = HashMap::with_capacity(ranks.len());
        for rank in &ranks {
            if rank_map.insert(rank.id.clone(), rank.clone()).is_some() {
                return Err(TransitError::DuplicateRank(rank.id.clone()));
            }
        }

        // Non-finite coordinates can never satisfy a spatial predicate, and
        // keeping them out of the tree keeps bulk loading well defined.
        let rank_tree = RTree::bulk_load(
            ranks
                .iter()
                .enumerate()
                .filter(|(_, rank)| rank.location.is_finite())
                .map(|(position, rank)| RankNode::new(position, rank.clone()))
                .collect(),
        );

        tracing::debug!(ranks = ranks.len(), "built rank index");

        Ok(Self {
            ranks,
            rank_map,
            rank_tree,
        })
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Restore repository order for nodes coming out of the tree.
    fn in_repository_order<'a>(nodes: impl Iterator<Item = &'a RankNode>) -> Vec<Arc<Rank>> {
        let mut hits: Vec<&RankNode> = nodes.collect();
        hits.sort_unstable_by_key(|node| node.position);
        hits.into_iter().map(|node| node.rank.clone()).collect()
    }
}

fn out_of_range(point: Coordinate) -> bool {
    point.is_finite()
        && (!(-90.0..=90.0).contains(&point.latitude)
            || !(-180.0..=180.0).contains(&point.longitude))
}

impl Default for StaticRankProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl RankRepository for StaticRankProvider {
    fn all_ranks(&self) -> Result<Vec<Arc<Rank>>> {
        Ok(self.ranks.clone())
    }

    fn get_rank(&self, id: &RankIdentifier) -> Result<Option<Arc<Rank>>> {
        Ok(self.rank_map.get(id).cloned())
    }

    fn ranks_within_bounds(&self, bounds: &MapBounds) -> Result<Vec<Arc<Rank>>> {
        // Inverted or non-finite rectangles match nothing, which the tree
        // would not reproduce since it normalizes corners.
        if !bounds.is_well_formed() {
            return Ok(self
                .ranks
                .iter()
                .filter(|rank| bounds.contains(rank.location))
                .cloned()
                .collect());
        }

        let envelope = bounds_envelope(bounds);
        Ok(Self::in_repository_order(
            self.rank_tree.locate_in_envelope_intersecting(&envelope),
        ))
    }

    fn ranks_near(&self, center: Coordinate, radius_m: f64) -> Result<Vec<Arc<Rank>>> {
        let within = |rank: &Rank| distance_meters(center, rank.location) <= radius_m;

        match search_envelope(center, radius_m) {
            Some(bounds) => {
                let envelope = bounds_envelope(&bounds);
                Ok(Self::in_repository_order(
                    self.rank_tree
                        .locate_in_envelope_intersecting(&envelope)
                        .filter(|node| within(&node.rank)),
                ))
            }
            None => Ok(self
                .ranks
                .iter()
                .filter(|rank| within(rank))
                .cloned()
                .collect()),
        }
    }
}
