//! # rutpoint-transit
//!
//! Taxi-rank data, spatial queries, and the rank connection graph.
//!
//! ## Features
//!
//! - **Pluggable storage**: queries only see the [`RankRepository`] trait
//! - **Spatial queries**: R-tree backed bounds and radius lookups
//! - **Destination search**: case-insensitive route-name matching
//! - **Connections**: ranks linked by shared destination names
//! - **Serde** (optional): the JSON wire shape used by the HTTP service
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use rutpoint_transit::prelude::*;
//!
//! let provider = rutpoint_transit::provider::fixture::reference_provider().unwrap();
//! let engine = QueryEngine::new(Arc::new(provider));
//!
//! // Ranks within 5km of Alexandra
//! let alexandra = Coordinate::new(-26.1067, 28.1067);
//! let nearby = engine.find_nearby(alexandra, 5_000.0).unwrap();
//! assert_eq!(nearby.len(), 1);
//!
//! // Randburg shares Sandton and Rosebank with Alexandra
//! let connections = engine.find_connections(&RankIdentifier::new("2")).unwrap();
//! assert_eq!(connections[0].rank_id.as_str(), "1");
//! ```

pub mod connections;
pub mod identifiers;
pub mod models;
pub mod provider;
pub mod query;
pub mod spatial;

// Re-exports for convenience
pub mod prelude {
    pub use crate::identifiers::*;
    pub use crate::models::{names::*, traits::*, types::*};
    pub use crate::provider::{SnapshotRankRepository, StaticRankProvider};
    pub use crate::query::QueryEngine;
    pub use crate::spatial::distance_meters;
}

pub use prelude::*;
