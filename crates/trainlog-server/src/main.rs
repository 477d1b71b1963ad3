//! Trainlog Server: Application entry point.

use clap::Parser;
use trainlog_db::DbManager;
use trainlog_server::{App, Cli, ServerError, init_tracing, load_dotenv};

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    load_dotenv()?;
    init_tracing()?;

    let settings = Cli::parse().into_settings()?;
    tracing::info!("Starting trainlog server...");

    let manager = DbManager::connect(&settings.db).await?;
    trainlog_db::run_migrations(manager.client()).await?;

    let _app = App::new(manager.client().clone(), &settings)?;
    tracing::info!("Trainlog server ready");

    tokio::signal::ctrl_c().await?;
    tracing::info!("Trainlog server stopped.");
    Ok(())
}
