use std::process::ExitCode;

use dovvybuddy::app_from_config;
use dovvybuddy::utils::{config, telemetry::init_subscriber};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    if let Err(e) = init_subscriber("dovvybuddy", "dovvybuddy=info,tower_http=info") {
        eprintln!("Failed to install tracing subscriber: {e}");
    }

    // Fail fast: nothing is bound until the environment is valid.
    let config = match config::init() {
        Ok(config) => config,
        Err(e) => {
            error!(
                violations = e.violations().len(),
                "Refusing to start with invalid environment"
            );
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    info!(app_env = config.app_env(), "Configuration loaded");

    let app = app_from_config(config);

    let addr = config.bind_addr();
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(%addr, ?e, "Failed to bind listener");
            return ExitCode::FAILURE;
        }
    };
    match listener.local_addr() {
        Ok(local) => info!("Server starting at http://{local}"),
        Err(e) => info!(%addr, ?e, "Server starting"),
    }

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(?e, "Server terminated with error");
        return ExitCode::FAILURE;
    }

    info!("Server stopped");
    ExitCode::SUCCESS
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(?e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(?e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
