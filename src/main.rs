//! Server binary: reads DB_* and server settings from the environment (and `.env`), then serves
//! `/api/registerUser`, `/api/linkAdminToNonAdmin`, `/api/getUsers` plus health routes.

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use user_registry::{app, ensure_schema, AppState, ConnectionProvider, DbConfig, PgUserStore, QueryExecutor, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("user_registry=info,tower_http=info")),
        )
        .init();

    let db_config = DbConfig::from_env()?;
    let server_config = ServerConfig::from_env()?;

    let executor = QueryExecutor::new(ConnectionProvider::new(&db_config));
    if server_config.ensure_schema {
        ensure_schema(&executor).await?;
    }
    let state = AppState::new(PgUserStore::new(executor));
    let router = app(state, server_config.max_body_bytes);

    let listener = TcpListener::bind(server_config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("received Ctrl+C, shutting down");
}
