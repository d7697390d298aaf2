use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::ServerError;

/// Install the global subscriber: `fmt` output filtered by `RUST_LOG`, `info` by default.
pub fn init() -> Result<(), ServerError> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .try_init()
        .map_err(|err| ServerError::Telemetry(err.to_string()))
}
