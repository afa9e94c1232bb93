//! Project commands: `projects list`, `projects show`.

use crate::config::Config;
use crate::error::Result;
use crate::output;

/// List projects visible to the current user.
pub async fn list(config: &Config, limit: Option<u32>) -> Result<()> {
    let client = super::connect(config)?;
    let projects = client
        .get_projects(limit.unwrap_or(config.default_limit))
        .await?;

    if projects.is_empty() {
        println!("No projects visible to your account.");
        return Ok(());
    }

    println!("{}", output::projects_table(&projects));
    Ok(())
}

/// Show one project, or open it in the browser with `--web`.
pub async fn show(config: &Config, id: &str, web: bool) -> Result<()> {
    let id = config.resolve_id(id)?;
    let client = super::connect(config)?;
    let project = client.get_project(id).await?;

    if web {
        let url = format!("{}/projects/{}", client.base_url(), project.identifier);
        open::that(&url)?;
        println!("Opened {}", url);
        return Ok(());
    }

    println!("{}", output::project_details(&project));
    Ok(())
}
