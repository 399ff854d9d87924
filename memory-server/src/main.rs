use memory_server::{Config, Server, init_logger};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env();
    init_logger(config.is_production());

    tracing::info!(
        "Starting memory-server (env: {}, demo data: {})",
        config.environment,
        config.seed_demo_data
    );

    let server = Server::new(config);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
