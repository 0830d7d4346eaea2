//! HTTP service answering taxi rank queries.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::ServiceError;
pub use routes::create_router;
pub use state::AppState;

/// Load data, bind and serve until ctrl-c.
pub async fn serve(config: ServerConfig) -> eyre::Result<()> {
    let state = AppState::load(&config).await?;
    let app = create_router(state, &config.api_prefix);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        prefix = %config::normalize_prefix(&config.api_prefix),
        "rank service listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("rank service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
