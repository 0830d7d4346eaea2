//! Route-name matching.
//!
//! Destination search and connection derivation both compare route names
//! case-insensitively. They go through [`fold_name`] so the two can never
//! disagree on what "the same name" means.

use crate::models::types::Rank;

/// Case-folds a route or destination name for comparison.
pub fn fold_name(name: &str) -> String {
    name.to_lowercase()
}

/// A destination search term, folded once and tested against many routes.
///
/// Matching is substring containment on folded names. Connection derivation
/// uses folded equality instead and does not go through this type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DestinationFilter {
    folded: String,
}

impl DestinationFilter {
    pub fn new(text: &str) -> Self {
        Self {
            folded: fold_name(text),
        }
    }

    pub fn matches_name(&self, name: &str) -> bool {
        fold_name(name).contains(&self.folded)
    }

    /// True when at least one of the rank's routes matches.
    pub fn matches_rank(&self, rank: &Rank) -> bool {
        rank.routes.iter().any(|route| self.matches_name(&route.name))
    }
}
