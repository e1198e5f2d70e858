//! garage-server binary

use garage_server::{AppState, Config, api, logger};
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenv::dotenv();

    let config = Config::from_env()?;
    logger::init_logger(
        &config.log_level,
        config.log_json,
        config.log_dir.as_deref(),
    );

    if config.uses_placeholder_secret() {
        tracing::warn!("ACCESS_TOKEN_SECRET not set, using the development placeholder");
    }
    tracing::info!("Starting garage-server (env: {})", config.environment);

    let state = AppState::initialize(&config).await?;
    let app = api::build_app(state);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("garage-server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("garage-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
