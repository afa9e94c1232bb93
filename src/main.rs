//! rmine - a command-line client for Redmine.
//!
//! Authenticates against a Redmine server, fetches projects and issues
//! over its REST API, and renders the results as tables. Numeric IDs
//! can be given memorable aliases that work in any command.

mod api;
mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

use clap::Parser;

use cli::Cli;
use error::{AppError, Result};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e.user_message());
        if let Some(action) = e.suggested_action() {
            eprintln!("{}", action);
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    logging::init().map_err(|e| AppError::other(format!("failed to initialize logging: {}", e)))?;
    commands::dispatch(cli).await
}
