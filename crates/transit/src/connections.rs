//! Connection-graph derivation.
//!
//! Two ranks are connected when they serve a destination with the same name
//! after case-folding. Names are compared for equality, never containment.
//!
//! The subject's folded names go into a hash set, so deriving the
//! connections of one rank is linear in the total number of routes rather
//! than the naive ranks × routes² comparison. The output is identical.

use std::collections::HashSet;
use std::sync::Arc;

use crate::identifiers::RankIdentifier;
use crate::models::names::fold_name;
use crate::models::types::{Connection, Rank};

/// Connections of `subject` within one repository snapshot.
///
/// An unknown subject yields no connections. The subject never connects to
/// itself. Output follows snapshot order; destinations follow the connected
/// rank's own route order and spelling.
pub fn derive_connections(snapshot: &[Arc<Rank>], subject: &RankIdentifier) -> Vec<Connection> {
    let Some(subject_rank) = snapshot.iter().find(|rank| &rank.id == subject) else {
        return Vec::new();
    };

    let served: HashSet<String> = subject_rank
        .routes
        .iter()
        .map(|route| fold_name(&route.name))
        .collect();

    snapshot
        .iter()
        .filter(|other| &other.id != subject)
        .filter_map(|other| {
            let destinations: Vec<Arc<str>> = other
                .routes
                .iter()
                .filter(|route| served.contains(&fold_name(&route.name)))
                .map(|route| route.name.clone())
                .collect();

            (!destinations.is_empty()).then(|| Connection {
                rank_id: other.id.clone(),
                destinations,
            })
        })
        .collect()
}
