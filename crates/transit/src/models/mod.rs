//! Rank data models, name matching, and the repository trait.

pub mod names;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use names::{fold_name, DestinationFilter};
pub use traits::RankRepository;
pub use types::{
    AdditionalLocation, Connection, Coordinate, FareRange, MapBounds, OperatingHours, Rank, Result,
    Route, TransitError,
};
