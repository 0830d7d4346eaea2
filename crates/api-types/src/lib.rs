//! Wire types shared by the rank service and its clients.

mod envelope;
mod query;

pub use envelope::{ApiError, ApiResponse, HealthStatus, messages};
pub use query::{QueryError, RankQuery, params};

/// Mount point of the rank routes in the default deployment.
pub const DEFAULT_API_PREFIX: &str = "/api/v1";

/// Collection path, relative to the API prefix.
pub const TAXI_RANKS_PATH: &str = "/taxi-ranks";
