use std::process::ExitCode;

use memoproxy_configuration::{CONFIG_PATH_ENV, ServerConfig, config_path};
use memoproxy_server::{ServerError, telemetry};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = telemetry::init() {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "memoproxy stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), ServerError> {
    let path = config_path(std::env::var(CONFIG_PATH_ENV).ok(), std::env::args().nth(1))?;
    let config = ServerConfig::load(&path).await?;
    let app = memoproxy_server::build(&config).await?;

    let listener = TcpListener::bind(("0.0.0.0", config.port))
        .await
        .map_err(|source| ServerError::Bind {
            port: config.port,
            source,
        })?;
    info!(port = config.port, config = %path.display(), "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
