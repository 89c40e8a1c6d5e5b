use std::sync::Arc;

use anyhow::Context;

use todo_service::app::build_router;
use todo_service::config::ServerConfig;
use todo_service::store::{LibSqlBackend, TodoStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = ServerConfig::from_env().context("Invalid configuration")?;

    eprintln!("📝 Todo Service v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   API: http://{}/api/todo", config.bind_addr());
    eprintln!("   Database: {}", config.db_path.display());
    eprintln!("   Id mismatch policy: {:?}", config.id_mismatch);
    eprintln!("   CORS origins: {:?}\n", config.cors_origins);

    // ── Database ─────────────────────────────────────────────────────────
    let store: Arc<dyn TodoStore> = Arc::new(
        LibSqlBackend::new_local(&config.db_path)
            .await
            .with_context(|| format!("Failed to open database at {}", config.db_path.display()))?,
    );

    // ── HTTP ─────────────────────────────────────────────────────────────
    let app = build_router(store, &config);
    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr()))?;
    tracing::info!(addr = %config.bind_addr(), "Todo API server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Todo API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
