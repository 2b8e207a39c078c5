//! Outreach admin CLI.
//!
//! Browse reached people, manage email templates, and send bulk campaigns
//! against the outreach backend.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod people;
mod send;
mod templates;

use anyhow::Result;
use clap::{Parser, Subcommand};
use outreach_client::ApiClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

#[derive(Parser)]
#[command(name = "outreach", version, about = "Admin CLI for the outreach campaign backend")]
struct Cli {
    /// Base URL of the backend.
    #[arg(
        long,
        global = true,
        env = "OUTREACH_API_URL",
        default_value = "http://localhost:5000"
    )]
    api_url: Url,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Browse and export reached people.
    #[command(subcommand)]
    People(people::Command),

    /// Manage email templates.
    #[command(subcommand)]
    Templates(templates::Command),

    /// Compose and send a campaign.
    Send(send::Args),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "outreach=info,outreach_core=info,outreach_client=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let client = ApiClient::new(cli.api_url);

    match cli.command {
        Command::People(command) => people::run(command, &client).await,
        Command::Templates(command) => templates::run(command, &client).await,
        Command::Send(args) => send::run(args, &client).await,
    }
}
