//! Application builder — wires state + router into an Axum app and runs it.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{info, warn};

use taskhub_auth::{JwtDecoder, JwtEncoder, PasswordHasher, TokenBlocklist};
use taskhub_core::config::AppConfig;
use taskhub_core::error::AppError;
use taskhub_database::Database;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the shared application state from configuration and repositories.
pub fn build_state(config: Arc<AppConfig>, db: Database) -> AppState {
    let blocklist = Arc::new(TokenBlocklist::new(&config.auth));
    let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth, Arc::clone(&blocklist)));
    let password_hasher = Arc::new(PasswordHasher::new());

    AppState {
        config,
        db,
        jwt_encoder,
        jwt_decoder,
        blocklist,
        password_hasher,
    }
}

/// Builds the complete Axum application.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Runs the TaskHub server with the given configuration.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    let db = Database::connect(&config.database).await?;
    let state = build_state(Arc::new(config), db);
    let grace = Duration::from_secs(state.config.server.shutdown_grace_seconds);
    let addr = format!(
        "{}:{}",
        state.config.server.host, state.config.server.port
    );
    let app = build_app(state);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!(addr = %addr, "TaskHub server listening");

    serve(listener, app, shutdown_signal(), grace).await
}

/// Serves `app` until `shutdown` resolves, then drains in-flight
/// connections for at most `grace` before dropping them.
async fn serve(
    listener: TcpListener,
    app: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
    grace: Duration,
) -> Result<(), AppError> {
    let (drain_tx, drain_rx) = oneshot::channel();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown.await;
        let _ = drain_tx.send(());
    });
    let mut handle = tokio::spawn(async move { server.await });

    tokio::select! {
        result = &mut handle => return join_serve_result(result),
        _ = drain_rx => {}
    }

    match tokio::time::timeout(grace, &mut handle).await {
        Ok(result) => join_serve_result(result),
        Err(_) => {
            handle.abort();
            warn!(
                grace_seconds = grace.as_secs(),
                "Graceful shutdown timed out, dropping remaining connections"
            );
            Ok(())
        }
    }
}

fn join_serve_result(
    result: Result<std::io::Result<()>, tokio::task::JoinError>,
) -> Result<(), AppError> {
    match result {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(AppError::internal(format!("Server error: {e}"))),
        Err(e) => Err(AppError::internal(format!("Server task failed: {e}"))),
    }
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
