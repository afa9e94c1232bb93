//! Issue commands: `issues list`, `issues show`.

use crate::api::types::{Assignee, IssueFilter};
use crate::cli::IssueListArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output;

/// List issues matching the given filters.
pub async fn list(config: &Config, args: &IssueListArgs) -> Result<()> {
    let filter = build_filter(config, args)?;
    let client = super::connect(config)?;
    let response = client.get_issues(&filter).await?;

    if response.issues.is_empty() {
        println!("No issues match this filter.");
        return Ok(());
    }

    println!("{}", output::issues_table(&response.issues));

    if let Some(total) = response.total_count {
        if (response.issues.len() as u32) < total {
            println!("Showing {} of {} issues.", response.issues.len(), total);
        }
    }

    Ok(())
}

/// Show one issue, or open it in the browser with `--web`.
pub async fn show(config: &Config, id: &str, web: bool) -> Result<()> {
    let id = config.resolve_id(id)?;
    let client = super::connect(config)?;
    let issue = client.get_issue(id).await?;

    if web {
        let url = format!("{}/issues/{}", client.base_url(), issue.id);
        open::that(&url)?;
        println!("Opened {}", url);
        return Ok(());
    }

    println!("{}", output::issue_details(&issue));
    Ok(())
}

/// Translate command-line arguments into an API filter.
///
/// A bare `issues list` means "my open issues"; an explicit project or
/// subject filter widens the listing to all assignees unless one is
/// named.
fn build_filter(config: &Config, args: &IssueListArgs) -> Result<IssueFilter> {
    let project = args
        .project
        .as_deref()
        .map(|p| config.resolve_id(p))
        .transpose()?;

    let assignee = match args.assignee.as_deref() {
        Some("me") => Some(Assignee::Me),
        Some(other) => Some(Assignee::Id(config.resolve_id(other)?)),
        None if project.is_none() && args.query.is_none() => Some(Assignee::Me),
        None => None,
    };

    Ok(IssueFilter {
        project,
        assignee,
        status: args.status.into(),
        subject: args.query.clone(),
        limit: args.limit.unwrap_or(config.default_limit),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::StatusFilter;
    use crate::cli::StatusArg;

    fn args() -> IssueListArgs {
        IssueListArgs {
            project: None,
            assignee: None,
            status: StatusArg::Open,
            query: None,
            limit: None,
        }
    }

    fn config_with_alias() -> Config {
        let mut config = Config::default();
        config.set_alias("infra", 12).unwrap();
        config
    }

    #[test]
    fn test_bare_list_defaults_to_my_open_issues() {
        let filter = build_filter(&Config::default(), &args()).unwrap();
        assert_eq!(filter.assignee, Some(Assignee::Me));
        assert_eq!(filter.status, StatusFilter::Open);
        assert_eq!(filter.limit, 25);
    }

    #[test]
    fn test_project_filter_drops_default_assignee() {
        let mut a = args();
        a.project = Some("infra".to_string());
        let filter = build_filter(&config_with_alias(), &a).unwrap();
        assert_eq!(filter.project, Some(12));
        assert_eq!(filter.assignee, None);
    }

    #[test]
    fn test_explicit_assignee_me_kept_with_project() {
        let mut a = args();
        a.project = Some("12".to_string());
        a.assignee = Some("me".to_string());
        let filter = build_filter(&config_with_alias(), &a).unwrap();
        assert_eq!(filter.assignee, Some(Assignee::Me));
    }

    #[test]
    fn test_assignee_resolves_alias() {
        let mut config = Config::default();
        config.set_alias("jane", 5).unwrap();
        let mut a = args();
        a.assignee = Some("jane".to_string());
        let filter = build_filter(&config, &a).unwrap();
        assert_eq!(filter.assignee, Some(Assignee::Id(5)));
    }

    #[test]
    fn test_unknown_project_alias_fails_before_any_call() {
        let mut a = args();
        a.project = Some("missing".to_string());
        assert!(build_filter(&Config::default(), &a).is_err());
    }

    #[test]
    fn test_query_drops_default_assignee() {
        let mut a = args();
        a.query = Some("timeout".to_string());
        let filter = build_filter(&Config::default(), &a).unwrap();
        assert_eq!(filter.assignee, None);
        assert_eq!(filter.subject.as_deref(), Some("timeout"));
    }

    #[test]
    fn test_explicit_limit_wins_over_default() {
        let mut a = args();
        a.limit = Some(5);
        let filter = build_filter(&Config::default(), &a).unwrap();
        assert_eq!(filter.limit, 5);
    }
}
