//! Port to the device's location services.

use std::future::Future;
use std::pin::Pin;

use rutpoint_transit::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("location fix unavailable")]
    Unavailable,
}

/// Asks the host platform for a single position fix.
pub trait LocationProvider: Send + Sync {
    fn current_location<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Coordinate, LocationError>> + Send + 'a>>;
}
