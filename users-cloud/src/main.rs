//! users-cloud entry point

use users_cloud::{AppState, Config, api, init_logger};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;

    init_logger(config.is_production());

    tracing::info!(
        "Starting users-cloud (env: {}, database: {:?})",
        config.environment,
        config.database
    );

    let state = AppState::new(&config).await?;
    let app = api::build_app(state);

    let http_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;
    tracing::info!("users-cloud HTTP listening on {http_addr}");
    tracing::info!("API docs at {}/api-docs", config.public_url);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}
