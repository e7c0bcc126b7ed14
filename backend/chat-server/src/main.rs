use chat_config::Config;
use chat_server::{Application, logger};

use std::error::Error;
use std::path::PathBuf;

use log::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // .env is optional
    dotenvy::dotenv().ok();

    // Load and validate configuration
    let config = Config::load()?;
    config.validate()?;

    // Construct log file path if configured
    let log_file_path: Option<PathBuf> = if let Some(ref filename) = config.logging.file {
        let log_dir = Config::config_dir()?.join(&config.logging.dir);
        std::fs::create_dir_all(&log_dir)?;
        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting chat-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let application = Application::build(&config).await?;

    // Spawn signal handler for graceful shutdown
    let shutdown = application.shutdown_coordinator();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
                shutdown.shutdown();
            }
            Err(e) => {
                error!("Failed to listen for SIGINT: {}", e);
            }
        }
    });

    application.run().await?;

    Ok(())
}
