pub mod cli;
pub mod client;
pub mod date;
pub mod error;
pub mod models;
pub mod session;
pub mod settings;

use clap::Parser;

pub use crate::client::{Endpoints, ZdrofitClient};
pub use crate::date::{Date, DateTime, ParseError};
pub use crate::error::ClientError;
pub use crate::session::{InMemorySessionStore, SessionStore, SessionToken};

use crate::cli::Cli;
use crate::settings::Settings;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let settings = Settings::from_env()?;

    let env_filter = if settings.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    cli::execute(cli, &settings).await
}
