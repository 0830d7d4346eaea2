//! Network port used by the map controller, and its HTTP implementation.

mod http;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use rutpoint_transit::{Coordinate, MapBounds, Rank};

use crate::error::FetchError;

pub use http::{HttpClientConfig, HttpRankClient};

pub type FetchResult<T> = Result<T, FetchError>;

/// Rank queries the map screen needs.
pub trait RankClient: Send + Sync {
    fn ranks_within_bounds<'a>(
        &'a self,
        bounds: &'a MapBounds,
    ) -> Pin<Box<dyn Future<Output = FetchResult<Vec<Arc<Rank>>>> + Send + 'a>>;

    fn ranks_near<'a>(
        &'a self,
        center: Coordinate,
        radius_m: f64,
    ) -> Pin<Box<dyn Future<Output = FetchResult<Vec<Arc<Rank>>>> + Send + 'a>>;
}
