//! Alias commands: `aliases list`, `aliases add`, `aliases delete`.
//!
//! Aliases are pure config-file operations; no HTTP is involved.

use console::style;

use crate::config::Config;
use crate::error::Result;
use crate::output;

/// List all defined aliases.
pub fn list(config: &Config) -> Result<()> {
    if config.aliases.is_empty() {
        println!("You have no aliases set.");
        println!("Add one with: rmine aliases add <KEY> <ID>");
        return Ok(());
    }

    println!("{}", output::aliases_table(&config.aliases));
    Ok(())
}

/// Add or replace an alias.
pub fn add(config: &mut Config, key: &str, id: i64) -> Result<()> {
    config.set_alias(key, id)?;
    config.save()?;
    println!(
        "{} '{}: {}' has been added to aliases.",
        style("✓").green(),
        key,
        id
    );
    Ok(())
}

/// Remove an alias.
pub fn delete(config: &mut Config, key: &str) -> Result<()> {
    let id = config.remove_alias(key)?;
    config.save()?;
    println!("Alias '{}' (was {}) has been deleted.", key, id);
    Ok(())
}
