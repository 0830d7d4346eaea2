//! Spatial indexing and query utilities.

pub mod index;
pub mod queries;

pub use queries::{distance_meters, search_envelope, EARTH_RADIUS_M};
