use docvault_server::auth::google::GoogleProvider;
use docvault_server::state::AppState;
use docvault_server::{config, routes};
use docvault_store::SqliteStore;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    let cfg = config::load_config()?;

    let store = SqliteStore::connect(&cfg.sqlite_path).await?;
    let provider = GoogleProvider::new(cfg.google.clone());

    let addr = cfg.bind.clone();
    let state = AppState::new(cfg, Arc::new(store), Arc::new(provider));
    let app = routes::create_router(state);

    tracing::info!("docvault listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
