use crate::api;
use crate::core::{Config, Result, ServerError, ServerState};

/// HTTP server for the in-memory variant
pub struct Server {
    config: Config,
    state: ServerState,
}

impl Server {
    pub fn new(config: Config) -> Self {
        let state = ServerState::initialize(&config);
        Self { config, state }
    }

    /// Serve until ctrl-c
    pub async fn run(&self) -> Result<()> {
        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;

        tracing::info!("memory-server listening on http://{addr}");

        let app = api::build_app(&self.state);
        let shutdown = async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
        };

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        Ok(())
    }
}
