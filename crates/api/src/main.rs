use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clienthub_backend::{Backend, RestBackend};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clienthub_api::config::ServerConfig;
use clienthub_api::router::build_app_router;
use clienthub_api::session::SessionRegistry;
use clienthub_api::state::AppState;

/// How often expired sessions are dropped from the registry.
const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clienthub_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Backend ---
    let backend: Arc<dyn Backend> = Arc::new(
        RestBackend::new(
            config.backend.url.clone(),
            config.backend.anon_key.clone(),
            Duration::from_secs(config.backend.timeout_secs),
        )
        .expect("Failed to build backend HTTP client"),
    );
    tracing::info!(url = %config.backend.url, "Backend client created");

    match clienthub_backend::health_check(backend.as_ref()).await {
        Ok(()) => tracing::info!("Backend health check passed"),
        Err(e) => tracing::warn!(error = %e, "Backend health check failed, continuing"),
    }

    // --- Sessions ---
    let sessions = Arc::new(SessionRegistry::new(
        Arc::clone(&backend),
        Duration::from_secs(config.query_stale_secs),
    ));

    // Purge expired sessions periodically.
    let purge_cancel = CancellationToken::new();
    let purge_handle = tokio::spawn(run_session_purge(
        Arc::clone(&sessions),
        purge_cancel.clone(),
    ));

    // --- App state ---
    let state = AppState {
        backend,
        config: Arc::new(config.clone()),
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

    purge_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), purge_handle).await;
    tracing::info!(sessions = sessions.len().await, "Session purge task stopped");

    tracing::info!("Graceful shutdown complete");
}

/// Drop expired sessions until `cancel` fires.
async fn run_session_purge(sessions: Arc<SessionRegistry>, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(SESSION_PURGE_INTERVAL);
    loop {
        tokio::select! {
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                let removed = sessions.purge_expired(chrono::Utc::now().timestamp()).await;
                if removed > 0 {
                    tracing::debug!(removed, "Purged expired sessions");
                }
            }
        }
    }
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
