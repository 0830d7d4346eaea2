use std::collections::HashMap;
use std::sync::Arc;

use rutpoint_transit::{Rank, RankIdentifier};

/// The ranks currently shown on the map, unique by id.
///
/// A rank arriving again replaces the stored one in place, so repeated or
/// overlapping responses never duplicate markers.
#[derive(Clone, Debug, Default)]
pub struct VisibleRanks {
    ranks: Vec<Arc<Rank>>,
    index: HashMap<RankIdentifier, usize>,
}

impl VisibleRanks {
    pub fn merge(&mut self, incoming: impl IntoIterator<Item = Arc<Rank>>) {
        for rank in incoming {
            match self.index.get(&rank.id) {
                Some(&slot) => self.ranks[slot] = rank,
                None => {
                    self.index.insert(rank.id.clone(), self.ranks.len());
                    self.ranks.push(rank);
                }
            }
        }
    }

    pub fn replace(&mut self, incoming: impl IntoIterator<Item = Arc<Rank>>) {
        self.clear();
        self.merge(incoming);
    }

    pub fn clear(&mut self) {
        self.ranks.clear();
        self.index.clear();
    }

    pub fn get(&self, id: &RankIdentifier) -> Option<&Arc<Rank>> {
        self.index.get(id).map(|&slot| &self.ranks[slot])
    }

    pub fn as_slice(&self) -> &[Arc<Rank>] {
        &self.ranks
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}
