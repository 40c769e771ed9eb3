//! Boom Art Sales - command line
//!
//! Record-keeping and reporting for the Boom Art 3D printing shop.

use std::io;
use std::process::exit;

use boom_art_sales::{cli::Cli, commands, config::Config, AppState};
use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing; logs go to stderr so stdout stays pipeable
    let json_logs = std::env::var("BOOM_LOG_FORMAT").is_ok_and(|f| f == "json");
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "boom_sales=info,boom_art_sales=info".into()),
        )
        .with(json_logs.then(|| fmt::layer().json().with_writer(io::stderr)))
        .with((!json_logs).then(|| fmt::layer().with_writer(io::stderr)))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::load()?;
    tracing::debug!("Environment: {}", config.environment);
    tracing::debug!("Data directory: {}", config.storage.data_dir.display());

    let mut state = AppState::new(config);

    let mut input = io::stdin().lock();
    let mut out = io::stdout().lock();

    if let Err(e) = commands::run(&mut state, cli.command, &mut input, &mut out).await {
        tracing::debug!("Command failed: {}", e);
        eprintln!("{}", e.message_es());
        exit(1);
    }

    Ok(())
}
