//! Rank repository implementations.

pub mod fixture;
pub mod snapshot;
pub mod static_provider;

pub use snapshot::SnapshotRankRepository;
pub use static_provider::StaticRankProvider;
