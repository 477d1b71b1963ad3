//! Trainlog Server: configuration, tracing and service wiring.

pub mod app;
pub mod config;
pub mod error;

use std::path::PathBuf;

pub use app::App;
pub use config::{Cli, Settings};
pub use error::ServerError;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

/// Load `.env` if present. A missing file is not an error.
pub fn load_dotenv() -> Result<Option<PathBuf>, ServerError> {
    match dotenv::dotenv() {
        Err(dotenv::Error::Io(ref e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        r => r.map(Some).map_err(ServerError::from),
    }
}

/// JSON logs filtered by `RUST_LOG`, with `trainlog=info` as the floor.
pub fn init_tracing() -> Result<(), ServerError> {
    let directive: Directive = "trainlog=info"
        .parse()
        .map_err(|e| ServerError::Config(format!("log directive: {e}")))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .json()
        .try_init()
        .map_err(|e| ServerError::Config(format!("tracing init: {e}")))
}
