//! Table rendering for command output.
//!
//! Everything here renders to a `String` so it can be unit tested;
//! the command handlers print the result. Timestamps are shortened to
//! dates, long subjects are truncated, and missing values render as
//! placeholders rather than empty cells.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::api::types::{Issue, Project, User};

/// Maximum subject width in issue listings.
const SUBJECT_WIDTH: usize = 60;

#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Identifier")]
    identifier: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Parent")]
    parent: String,
    #[tabled(rename = "Created")]
    created: String,
}

impl From<&Project> for ProjectRow {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id,
            identifier: project.identifier.clone(),
            name: project.name.clone(),
            status: project.status_name().to_string(),
            parent: project.parent_name().to_string(),
            created: format_date(&project.created_on),
        }
    }
}

#[derive(Tabled)]
struct IssueRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Tracker")]
    tracker: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Subject")]
    subject: String,
    #[tabled(rename = "Assignee")]
    assignee: String,
    #[tabled(rename = "Updated")]
    updated: String,
}

impl From<&Issue> for IssueRow {
    fn from(issue: &Issue) -> Self {
        Self {
            id: issue.id,
            tracker: issue.tracker.name.clone(),
            status: issue.status.name.clone(),
            priority: issue.priority.name.clone(),
            subject: truncate(&issue.subject, SUBJECT_WIDTH),
            assignee: issue.assignee_name().to_string(),
            updated: format_date(&issue.updated_on),
        }
    }
}

#[derive(Tabled)]
struct AliasRow {
    #[tabled(rename = "Alias")]
    alias: String,
    #[tabled(rename = "ID")]
    id: i64,
}

/// Render the project list as a table.
pub fn projects_table(projects: &[Project]) -> String {
    let rows: Vec<ProjectRow> = projects.iter().map(ProjectRow::from).collect();
    styled(Table::new(rows))
}

/// Render one project as a key/value detail table.
pub fn project_details(project: &Project) -> String {
    let mut fields = vec![
        ("ID", project.id.to_string()),
        ("Name", project.name.clone()),
        ("Identifier", project.identifier.clone()),
        ("Status", project.status_name().to_string()),
        ("Parent", project.parent_name().to_string()),
        ("Created", format_date(&project.created_on)),
    ];

    let description = project.description_text();
    if !description.is_empty() {
        fields.push(("Description", description.to_string()));
    }

    details_table(fields)
}

/// Render the issue list as a table.
pub fn issues_table(issues: &[Issue]) -> String {
    let rows: Vec<IssueRow> = issues.iter().map(IssueRow::from).collect();
    styled(Table::new(rows))
}

/// Render one issue as a key/value detail table.
pub fn issue_details(issue: &Issue) -> String {
    let mut fields = vec![
        ("ID", format!("#{}", issue.id)),
        ("Subject", issue.subject.clone()),
        ("Project", issue.project.name.clone()),
        ("Tracker", issue.tracker.name.clone()),
        ("Status", issue.status.name.clone()),
        ("Priority", issue.priority.name.clone()),
        ("Author", issue.author.name.clone()),
        ("Assignee", issue.assignee_name().to_string()),
        ("Done", format!("{}%", issue.done_ratio)),
        ("Due", format_opt_date(&issue.due_date)),
        ("Created", format_date(&issue.created_on)),
        ("Updated", format_date(&issue.updated_on)),
    ];

    let description = issue.description_text();
    if !description.is_empty() {
        fields.push(("Description", description.to_string()));
    }

    details_table(fields)
}

/// Render the alias map as a table.
pub fn aliases_table(aliases: &BTreeMap<String, i64>) -> String {
    let rows: Vec<AliasRow> = aliases
        .iter()
        .map(|(alias, id)| AliasRow {
            alias: alias.clone(),
            id: *id,
        })
        .collect();
    styled(Table::new(rows))
}

/// Render the account as a key/value detail table.
pub fn user_details(user: &User) -> String {
    let mut fields = vec![
        ("ID", user.id.to_string()),
        ("Login", user.login.clone()),
        ("Name", user.name()),
        ("Mail", user.mail.as_deref().unwrap_or("-").to_string()),
    ];
    if let Some(created) = &user.created_on {
        fields.push(("Created", format_date(created)));
    }

    details_table(fields)
}

fn details_table(fields: Vec<(&str, String)>) -> String {
    let mut builder = Builder::default();
    for (key, value) in fields {
        builder.push_record([key.to_string(), value]);
    }
    styled(builder.build())
}

fn styled(mut table: Table) -> String {
    table.with(Style::sharp());
    table.to_string()
}

/// Format a timestamp as `YYYY-MM-DD`.
fn format_date(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d").to_string()
}

fn format_opt_date(date: &Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Truncate a string to `width` characters, adding an ellipsis.
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let cut: String = s.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Entity;
    use chrono::TimeZone;

    fn sample_project() -> Project {
        Project {
            id: 12,
            name: "Infrastructure".to_string(),
            identifier: "infra".to_string(),
            description: Some("Servers and networking".to_string()),
            status: 1,
            created_on: Utc.with_ymd_and_hms(2023, 4, 1, 9, 30, 0).unwrap(),
            parent: None,
        }
    }

    fn sample_issue() -> Issue {
        Issue {
            id: 101,
            project: Entity {
                id: 12,
                name: "Infrastructure".to_string(),
            },
            tracker: Entity {
                id: 1,
                name: "Bug".to_string(),
            },
            status: Entity {
                id: 2,
                name: "In Progress".to_string(),
            },
            priority: Entity {
                id: 4,
                name: "Normal".to_string(),
            },
            author: Entity {
                id: 5,
                name: "Jane Smith".to_string(),
            },
            assigned_to: None,
            subject: "Login page times out".to_string(),
            description: None,
            done_ratio: 40,
            due_date: None,
            created_on: Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap(),
            updated_on: Utc.with_ymd_and_hms(2024, 1, 16, 14, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_projects_table_contains_fields() {
        let table = projects_table(&[sample_project()]);
        assert!(table.contains("Infrastructure"));
        assert!(table.contains("infra"));
        assert!(table.contains("active"));
        assert!(table.contains("2023-04-01"));
    }

    #[test]
    fn test_project_details_skips_empty_description() {
        let mut project = sample_project();
        project.description = None;
        let table = project_details(&project);
        assert!(!table.contains("Description"));

        let table = project_details(&sample_project());
        assert!(table.contains("Servers and networking"));
    }

    #[test]
    fn test_issues_table_shows_unassigned() {
        let table = issues_table(&[sample_issue()]);
        assert!(table.contains("Unassigned"));
        assert!(table.contains("Login page times out"));
        assert!(table.contains("2024-01-16"));
    }

    #[test]
    fn test_issue_details_fields() {
        let table = issue_details(&sample_issue());
        assert!(table.contains("#101"));
        assert!(table.contains("40%"));
        assert!(table.contains("In Progress"));
        assert!(table.contains("Jane Smith"));
    }

    #[test]
    fn test_aliases_table() {
        let mut aliases = BTreeMap::new();
        aliases.insert("infra".to_string(), 12_i64);
        let table = aliases_table(&aliases);
        assert!(table.contains("infra"));
        assert!(table.contains("12"));
    }

    #[test]
    fn test_truncate_short_string_unchanged() {
        assert_eq!(truncate("short", 60), "short");
    }

    #[test]
    fn test_truncate_long_string() {
        let long = "x".repeat(80);
        let cut = truncate(&long, 60);
        assert_eq!(cut.chars().count(), 60);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn test_format_date() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        assert_eq!(format_date(&ts), "2024-01-15");
    }
}
