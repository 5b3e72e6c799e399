//! VINE Console CLI
//!
//! Terminal front end for the scheduler console: shows the scheduler status
//! and job history and sends lifecycle commands.

mod commands;
mod render;

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vine_client::SchedulerClient;
use vine_console::{ChannelNotifier, ConsoleConfig, SchedulerController};

use commands::{Commands, handle_command};

#[derive(Parser)]
#[command(name = "vine")]
#[command(about = "VINE scheduler console", long_about = None)]
struct Cli {
    /// Scheduler API URL, including the API prefix
    #[arg(long, env = "VINE_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Logs go to stderr so they never mix with command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vine_console=warn,vine_client=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = ConsoleConfig::from_env()?;
    if let Some(api_url) = cli.api_url {
        config = config.with_api_url(api_url);
    }
    config.validate()?;
    debug!("Loaded configuration: {:?}", config);

    let client = SchedulerClient::with_client(config.api_url.clone(), config.http_client()?);
    let (notifier, notices) = ChannelNotifier::new();

    let controller = SchedulerController::new(
        Arc::new(client),
        Arc::new(notifier),
        config.initial_filter(),
    );

    handle_command(cli.command, controller, notices).await
}
