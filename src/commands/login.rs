//! Session commands: `login`, `logout`, `me`.

use console::style;
use dialoguer::{Input, Password};
use tracing::info;

use crate::api::types::User;
use crate::api::{auth, ApiError, RedmineClient};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::output;

/// Connect to a Redmine server and store credentials.
///
/// The URL and key can come from flags; anything missing is prompted
/// for. With no key, the user can fall back to a username/password
/// exchange that fetches the account's API key. Either way the key ends
/// up in the OS keyring and the URL/login in the config file.
pub async fn login(config: &mut Config, url: Option<String>, key: Option<String>) -> Result<()> {
    let url = match url {
        Some(url) => url,
        None => prompt_url(&config.url)?,
    };

    let (user, api_key) = match key {
        Some(key) => verify_key(&url, &key).await?,
        None => prompt_credentials(&url).await?,
    };

    auth::store_key(&user.login, &api_key)?;

    config.url = url.trim_end_matches('/').to_string();
    config.login = user.login.clone();
    config.save()?;

    info!(login = %user.login, "Login successful");
    println!(
        "{} Logged in to {} as {} ({})",
        style("✓").green(),
        config.url,
        user.name(),
        user.login
    );
    Ok(())
}

/// Remove stored credentials.
pub fn logout(config: &mut Config) -> Result<()> {
    if config.login.is_empty() {
        println!("Not logged in.");
        return Ok(());
    }

    if auth::has_key(&config.login) {
        auth::delete_key(&config.login)?;
    }

    let login = std::mem::take(&mut config.login);
    config.save()?;

    info!(login = %login, "Logged out");
    println!("Logged out '{}'.", login);
    Ok(())
}

/// Show the authenticated account.
pub async fn me(config: &Config) -> Result<()> {
    let client = super::connect(config)?;
    let user = client.current_user().await?;
    println!("{}", output::user_details(&user));
    Ok(())
}

/// Validate an explicit API key against the server.
async fn verify_key(url: &str, key: &str) -> Result<(User, String)> {
    let client = RedmineClient::with_key(url, key)?;
    let user = client.validate_connection().await?;
    Ok((user, key.to_string()))
}

fn prompt_url(current: &str) -> Result<String> {
    let mut input = Input::<String>::new().with_prompt("Redmine URL");
    if !current.is_empty() {
        input = input.default(current.to_string());
    }
    input.interact_text().map_err(prompt_error)
}

/// Prompt for an API key, falling back to a username/password exchange.
async fn prompt_credentials(url: &str) -> Result<(User, String)> {
    let key: String = Input::new()
        .with_prompt("API key (leave empty to use username/password)")
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_error)?;

    if !key.trim().is_empty() {
        return verify_key(url, key.trim()).await;
    }

    let username: String = Input::new()
        .with_prompt("Username")
        .interact_text()
        .map_err(prompt_error)?;
    let password = Password::new()
        .with_prompt("Password")
        .interact()
        .map_err(prompt_error)?;

    let user = RedmineClient::login(url, &username, &password).await?;
    let api_key = user.api_key.clone().ok_or_else(|| {
        ApiError::InvalidResponse(
            "account has no API key; enable the REST API in Redmine administration settings"
                .to_string(),
        )
    })?;

    Ok((user, api_key))
}

fn prompt_error(e: dialoguer::Error) -> AppError {
    AppError::other(format!("prompt failed: {}", e))
}
