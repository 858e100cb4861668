use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use needs_api::config::ServerConfig;
use needs_api::router::build_app_router;
use needs_api::sessions::{start_idle_sweep, SessionManager};
use needs_api::state::AppState;
use needs_store::{ResponseRepo, StoreClient, StoreConfig};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "needs_api=debug,needs_core=debug,needs_store=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Record store ---
    // Missing settings are logged by `from_env`; the server still starts and
    // store calls fail until they are provided.
    let store_config = StoreConfig::from_env();
    let client = StoreClient::new(store_config).expect("Failed to build record store client");
    tracing::info!(configured = client.is_configured(), "Record store client created");

    // --- Sessions ---
    let sessions = Arc::new(SessionManager::new());
    let sweep_handle = start_idle_sweep(
        Arc::clone(&sessions),
        Duration::from_secs(config.session_sweep_secs),
        Duration::from_secs(config.session_idle_secs),
    );
    tracing::info!(
        idle_secs = config.session_idle_secs,
        sweep_secs = config.session_sweep_secs,
        "Idle session sweep started"
    );

    // --- App state ---
    let state = AppState {
        store: Arc::new(ResponseRepo::new(client)),
        sessions: Arc::clone(&sessions),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    sweep_handle.abort();

    let session_count = sessions.count().await;
    tracing::info!(session_count, "Closing remaining sessions");
    sessions.shutdown_all().await;

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
