use std::sync::Arc;

use tracing::info;
use vc_diligence::api::start_server;
use vc_diligence::config::Config;
use vc_diligence::pipeline::DiligencePipeline;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    let config = Config::from_env();
    if config.minimax_api_key.is_empty() {
        eprintln!("MINIMAX_API_KEY not set in .env");
        eprintln!("See .env.example for setup instructions");
    }

    let api_port: u16 = std::env::var("PORT")
        .or_else(|_| std::env::var("API_PORT"))
        .unwrap_or_else(|_| "8080".to_string())
        .parse()?;

    info!("VC Diligence Pipeline - API Server");
    info!("Port: {}", api_port);

    let pipeline = Arc::new(DiligencePipeline::from_config(config));

    info!("Pipeline initialized");
    info!("Starting API server...");

    start_server(pipeline, api_port).await?;

    Ok(())
}
