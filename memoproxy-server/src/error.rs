use memoproxy_configuration::ConfigError;

/// Fatal error while starting or running the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration could not be loaded or a component could not be built.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The tracing subscriber could not be installed.
    #[error("failed to install tracing subscriber: {0}")]
    Telemetry(String),
    /// The listening socket could not be bound.
    #[error("failed to bind port {port}: {source}")]
    Bind {
        /// Requested port.
        port: u16,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The server stopped with an I/O error.
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}
