//! Client side of the taxi rank locator: the map screen controller, the
//! rank service client and navigation hand-off.
//!
//! Platform services (location, map rendering, launching apps) stay with the
//! host; this crate reaches them through the traits in [`location`] and
//! [`navigation`].

pub mod client;
pub mod debounce;
pub mod error;
pub mod location;
pub mod navigation;
pub mod state;

pub use client::{HttpClientConfig, HttpRankClient, RankClient};
pub use error::{ControllerError, FetchError, FetchErrorKind};
pub use state::view::map::{ControllerConfig, MapController, Phase, Viewport};
