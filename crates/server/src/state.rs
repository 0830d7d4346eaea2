use std::sync::Arc;

use eyre::WrapErr;
use rutpoint_transit::provider::fixture;
use rutpoint_transit::{QueryEngine, Rank, RankRepository, SnapshotRankRepository, StaticRankProvider};

use crate::config::ServerConfig;

/// Shared by every handler; cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub engine: QueryEngine,
}

impl AppState {
    pub fn new(repository: Arc<dyn RankRepository>) -> Self {
        Self {
            engine: QueryEngine::new(repository),
        }
    }

    /// Load the configured data set, or the reference ranks if none is set.
    pub async fn load(config: &ServerConfig) -> eyre::Result<Self> {
        let provider = match &config.ranks_file {
            Some(path) => {
                let bytes = tokio::fs::read(path)
                    .await
                    .wrap_err_with(|| format!("reading {}", path.display()))?;
                let ranks: Vec<Rank> = serde_json::from_slice(&bytes)
                    .wrap_err_with(|| format!("parsing {}", path.display()))?;
                StaticRankProvider::from_ranks(ranks)?
            }
            None => fixture::reference_provider()?,
        };

        tracing::info!(
            ranks = provider.len(),
            source = %config
                .ranks_file
                .as_ref()
                .map_or_else(|| "reference fixture".to_owned(), |p| p.display().to_string()),
            "loaded rank data"
        );

        Ok(Self::new(Arc::new(SnapshotRankRepository::new(provider))))
    }
}
