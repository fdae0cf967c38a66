use color_eyre::eyre::Result;
use dotenv::dotenv;
use slotbook_api::{build_directory, config::ApiConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;

    // Pick the directory the slots are built from
    let directory = build_directory(&config.data_source)?;

    // Start API server; the initial load runs in the background
    slotbook_api::start_server(config, directory).await?;

    Ok(())
}
