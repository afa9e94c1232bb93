//! Command handlers.
//!
//! Each submodule owns one verb: validate arguments, call the client or
//! the config store, print the rendered result. All user-facing output
//! happens here; the layers below return data.

pub mod aliases;
pub mod issues;
pub mod login;
pub mod projects;

use crate::api::RedmineClient;
use crate::cli::{AliasCommands, Cli, Commands, IssueCommands, ProjectCommands};
use crate::config::Config;
use crate::error::Result;

/// Dispatch a parsed command line to its handler.
pub async fn dispatch(cli: Cli) -> Result<()> {
    let mut config = Config::load()?;

    match cli.command {
        Commands::Login { url, key } => login::login(&mut config, url, key).await,
        Commands::Logout => login::logout(&mut config),
        Commands::Me => login::me(&config).await,
        Commands::Projects { action } => match action {
            ProjectCommands::List { limit } => projects::list(&config, limit).await,
            ProjectCommands::Show { id, web } => projects::show(&config, &id, web).await,
        },
        Commands::Issues { action } => match action {
            IssueCommands::List(args) => issues::list(&config, &args).await,
            IssueCommands::Show { id, web } => issues::show(&config, &id, web).await,
        },
        Commands::Aliases { action } => match action {
            AliasCommands::List => aliases::list(&config),
            AliasCommands::Add { key, id } => aliases::add(&mut config, &key, id),
            AliasCommands::Delete { key } => aliases::delete(&mut config, &key),
        },
    }
}

/// Build an authenticated client from the stored configuration.
fn connect(config: &Config) -> Result<RedmineClient> {
    config.require_login()?;
    Ok(RedmineClient::new(config)?)
}
