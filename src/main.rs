use std::sync::Arc;

use talent_ranking_api::{
    config::Config,
    routes::{create_router, AppState},
    services::{ContentRepository, InMemoryContentRepository},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;

    let repository: Arc<dyn ContentRepository> = match &config.content_seed_path {
        Some(path) => Arc::new(InMemoryContentRepository::from_json_file(path).await?),
        None => Arc::new(InMemoryContentRepository::default()),
    };

    let state = AppState::from_config(&config, repository)?;
    tracing::info!(
        band_size = state.engine.band_size().get(),
        default_limit = state.limits.default_limit,
        max_limit = state.limits.max_limit,
        "Ranking engine configured"
    );

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
