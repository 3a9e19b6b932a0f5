use anyhow::Context;
use tracing::info;

use cinematch_api::api::{create_router, AppState};
use cinematch_api::catalog::CatalogStore;
use cinematch_api::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cinematch_api=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    // One-time load; the catalog is immutable for the rest of the process.
    let catalog_bytes = tokio::fs::read(&config.catalog_path)
        .await
        .with_context(|| format!("failed to read catalog from {}", config.catalog_path))?;
    let similarity_bytes = tokio::fs::read(&config.similarity_path)
        .await
        .with_context(|| format!("failed to read similarity matrix from {}", config.similarity_path))?;
    let catalog = CatalogStore::load(&catalog_bytes, &similarity_bytes)
        .context("failed to load catalog artifacts")?;

    let state = AppState::new(catalog, config.top_k);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server running on http://{addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
