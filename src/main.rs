use log::debug;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env first so it can carry RUST_LOG
    let dotenv = dotenvy::dotenv();
    env_logger::init();
    if let Err(e) = dotenv {
        debug!("No .env loaded: {e}");
    }

    cli::run().await?;
    Ok(())
}
