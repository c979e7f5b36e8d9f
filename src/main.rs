mod client;
mod commands;
mod config;
mod models;
mod roster;
mod web;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Activity sign-up board — browse activities, sign up and unregister
/// participants against the activities API.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Print detailed API responses
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Path to config file
    #[arg(short = 'c', long, global = true, default_value = "config.toml")]
    config: PathBuf,

    /// Override API base URL from config
    #[arg(short = 'b', long, global = true)]
    base_url: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the activity board (description, schedule, spots left, roster)
    Board,

    /// Sign a participant up for an activity
    Signup {
        /// Activity name, e.g. "Chess Club"
        activity: String,

        /// Participant email
        email: String,
    },

    /// Remove a participant from an activity
    Unregister {
        /// Activity name, e.g. "Chess Club"
        activity: String,

        /// Participant email
        email: String,
    },

    /// Start the web board server
    Serve {
        /// Listen address (e.g. "0.0.0.0:3009"); overrides config
        #[arg(short = 'a', long)]
        addr: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let cfg = config::load_config(&cli.config)?;
    let base_url = cli.base_url.as_deref().unwrap_or(&cfg.api.base_url);

    match &cli.command {
        Command::Board => {
            commands::run_board(base_url, cli.verbose).await?;
        }
        Command::Signup { activity, email } => {
            commands::run_signup(base_url, activity, email).await?;
        }
        Command::Unregister { activity, email } => {
            commands::run_unregister(base_url, activity, email).await?;
        }
        Command::Serve { addr } => {
            let addr = addr.as_deref().unwrap_or(&cfg.web.addr);
            web::serve(base_url, addr).await?;
        }
    }

    Ok(())
}
