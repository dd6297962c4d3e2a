//! fizzbuzz server
//!
//! - `GET /api/v1/fizzbuzz?int1=..&int2=..&limit=..&str1=..&str2=..[&start=..]`
//! - `GET /api/v1/statistics`
//! - Operational: `/healthz`, `/readyz`, `/metrics`
//! - Graceful shutdown on Ctrl+C / SIGTERM

use fizzbuzz_core::error::{FizzBuzzError, Result};
use fizzbuzz_server::{app_state, config, obs, router};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("fizzbuzz-server: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let path = std::env::var(config::CONFIG_PATH_ENV)
        .unwrap_or_else(|_| config::DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::load_from_file(&path)?;
    obs::logging::init(&cfg.log)?;

    let listen = cfg.server.listen_addr()?;
    let backend = cfg.statistics.backend.as_str();
    let state = app_state::AppState::new(cfg)?;
    let app = router::build_router(state.clone());

    tracing::info!(%listen, backend, config = %path, "fizzbuzz-server starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| FizzBuzzError::Internal(format!("failed to bind {listen}: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await
        .map_err(|e| FizzBuzzError::Internal(format!("server failed: {e}")))?;

    tracing::info!("fizzbuzz-server stopped");
    Ok(())
}

async fn shutdown_signal(state: app_state::AppState) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
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

    state.set_draining();
    tracing::info!("signal received, draining in-flight requests");
}
