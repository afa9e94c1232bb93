//! Redmine API request and response types.
//!
//! These types model the Redmine REST API JSON payloads for projects,
//! issues, and users. Every resource arrives wrapped in a single-key
//! envelope (`{"project": {...}}`, `{"issues": [...], "total_count": N}`),
//! so each record type has a matching envelope type.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A generic id/name pair.
///
/// Redmine uses this shape for trackers, statuses, priorities, users,
/// and project references nested inside other records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// The numeric ID.
    pub id: i64,
    /// The display name.
    pub name: String,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A Redmine project.
///
/// Returned by `GET /projects/{id}.json` or as part of the project list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// The project ID.
    pub id: i64,
    /// The project name.
    pub name: String,
    /// The project identifier (URL slug).
    pub identifier: String,
    /// The project description.
    #[serde(default)]
    pub description: Option<String>,
    /// The project status code (1 = active, 5 = closed, 9 = archived).
    pub status: i32,
    /// When the project was created.
    pub created_on: DateTime<Utc>,
    /// The parent project, if this is a subproject.
    #[serde(default)]
    pub parent: Option<Entity>,
}

impl Project {
    /// Get the description, or an empty string if not set.
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Get the parent project name, or "-" if this is a top-level project.
    pub fn parent_name(&self) -> &str {
        self.parent.as_ref().map(|p| p.name.as_str()).unwrap_or("-")
    }

    /// Get a human-readable name for the status code.
    pub fn status_name(&self) -> &'static str {
        match self.status {
            1 => "active",
            5 => "closed",
            9 => "archived",
            _ => "unknown",
        }
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.identifier)
    }
}

/// Envelope for a single project response.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectResponse {
    /// The wrapped project.
    pub project: Project,
}

/// Envelope for the project list response.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectsResponse {
    /// The list of projects.
    #[serde(default)]
    pub projects: Vec<Project>,
    /// Total number of projects on the server.
    #[serde(default)]
    pub total_count: Option<u32>,
}

/// A Redmine issue.
///
/// Returned by `GET /issues/{id}.json` or as part of issue list results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// The issue ID.
    pub id: i64,
    /// The project this issue belongs to.
    pub project: Entity,
    /// The tracker (Bug, Feature, Support, ...).
    pub tracker: Entity,
    /// The issue status.
    pub status: Entity,
    /// The issue priority.
    pub priority: Entity,
    /// The user who created the issue.
    pub author: Entity,
    /// The user the issue is assigned to.
    #[serde(default)]
    pub assigned_to: Option<Entity>,
    /// The issue subject/title.
    pub subject: String,
    /// The issue description.
    #[serde(default)]
    pub description: Option<String>,
    /// Completion percentage (0-100).
    #[serde(default)]
    pub done_ratio: u32,
    /// When the issue is due.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// When the issue was created.
    pub created_on: DateTime<Utc>,
    /// When the issue was last updated.
    pub updated_on: DateTime<Utc>,
}

impl Issue {
    /// Get the assignee name, or "Unassigned" if not set.
    pub fn assignee_name(&self) -> &str {
        self.assigned_to
            .as_ref()
            .map(|u| u.name.as_str())
            .unwrap_or("Unassigned")
    }

    /// Get the description, or an empty string if not set.
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}: {}", self.id, self.subject)
    }
}

/// Envelope for a single issue response.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueResponse {
    /// The wrapped issue.
    pub issue: Issue,
}

/// Envelope for the issue list response.
#[derive(Debug, Clone, Deserialize)]
pub struct IssuesResponse {
    /// The list of issues.
    #[serde(default)]
    pub issues: Vec<Issue>,
    /// Total number of issues matching the filter.
    #[serde(default)]
    pub total_count: Option<u32>,
    /// Index of the first returned issue.
    #[serde(default)]
    pub offset: Option<u32>,
    /// Maximum results requested.
    #[serde(default)]
    pub limit: Option<u32>,
}

/// A Redmine user account.
///
/// Returned by `GET /users/current.json`. The `api_key` field is only
/// present when the request is authenticated as that user.
#[derive(Clone, Serialize, Deserialize)]
pub struct User {
    /// The user ID.
    pub id: i64,
    /// The login name.
    pub login: String,
    /// The user's first name.
    #[serde(default)]
    pub firstname: String,
    /// The user's last name.
    #[serde(default)]
    pub lastname: String,
    /// The user's email address (may be hidden).
    #[serde(default)]
    pub mail: Option<String>,
    /// The account's API key.
    #[serde(default)]
    pub api_key: Option<String>,
    /// When the account was created.
    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,
}

impl User {
    /// Get the full display name.
    pub fn name(&self) -> String {
        let name = format!("{} {}", self.firstname, self.lastname);
        let name = name.trim().to_string();
        if name.is_empty() {
            self.login.clone()
        } else {
            name
        }
    }
}

// Manual Debug so the API key never leaks into logs.
impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("login", &self.login)
            .field("firstname", &self.firstname)
            .field("lastname", &self.lastname)
            .field("mail", &self.mail)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("created_on", &self.created_on)
            .finish()
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Envelope for the current user response.
#[derive(Debug, Clone, Deserialize)]
pub struct UserResponse {
    /// The wrapped user.
    pub user: User,
}

/// Assignee filter for issue listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignee {
    /// Issues assigned to the authenticated user.
    Me,
    /// Issues assigned to a specific user ID.
    Id(i64),
}

/// Status filter for issue listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// Open issues only.
    #[default]
    Open,
    /// Closed issues only.
    Closed,
    /// All issues regardless of status.
    All,
}

impl StatusFilter {
    fn as_param(self) -> &'static str {
        match self {
            StatusFilter::Open => "open",
            StatusFilter::Closed => "closed",
            StatusFilter::All => "*",
        }
    }
}

/// Filter parameters for `GET /issues.json`.
#[derive(Debug, Clone, Default)]
pub struct IssueFilter {
    /// Restrict to a single project.
    pub project: Option<i64>,
    /// Restrict to an assignee.
    pub assignee: Option<Assignee>,
    /// Restrict by status.
    pub status: StatusFilter,
    /// Substring match against the issue subject.
    pub subject: Option<String>,
    /// Maximum number of issues to return.
    pub limit: u32,
}

impl IssueFilter {
    /// Build the query string for this filter.
    ///
    /// Values are percent-encoded; the `~` prefix on the subject filter is
    /// Redmine's "contains" operator and must stay unencoded.
    pub fn to_query(&self) -> String {
        let mut params = vec![format!("limit={}", self.limit)];

        params.push(format!("status_id={}", self.status.as_param()));

        match &self.assignee {
            Some(Assignee::Me) => params.push("assigned_to_id=me".to_string()),
            Some(Assignee::Id(id)) => params.push(format!("assigned_to_id={}", id)),
            None => {}
        }

        if let Some(project) = self.project {
            params.push(format!("project_id={}", project));
        }

        if let Some(subject) = &self.subject {
            params.push(format!("subject=~{}", urlencoding::encode(subject)));
        }

        params.join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_project() {
        let json = r#"{
            "id": 12,
            "name": "Infrastructure",
            "identifier": "infra",
            "description": "Servers and networking",
            "status": 1,
            "created_on": "2023-04-01T09:30:00Z"
        }"#;

        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.id, 12);
        assert_eq!(project.name, "Infrastructure");
        assert_eq!(project.identifier, "infra");
        assert_eq!(project.description_text(), "Servers and networking");
        assert_eq!(project.status_name(), "active");
        assert!(project.parent.is_none());
        assert_eq!(project.parent_name(), "-");
    }

    #[test]
    fn test_parse_project_with_parent() {
        let json = r#"{
            "id": 13,
            "name": "Networking",
            "identifier": "networking",
            "description": null,
            "status": 5,
            "created_on": "2023-04-02T10:00:00Z",
            "parent": {"id": 12, "name": "Infrastructure"}
        }"#;

        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.parent_name(), "Infrastructure");
        assert_eq!(project.status_name(), "closed");
        assert_eq!(project.description_text(), "");
    }

    #[test]
    fn test_parse_projects_response() {
        let json = r#"{
            "projects": [
                {
                    "id": 1,
                    "name": "First",
                    "identifier": "first",
                    "status": 1,
                    "created_on": "2023-01-01T00:00:00Z"
                },
                {
                    "id": 2,
                    "name": "Second",
                    "identifier": "second",
                    "status": 1,
                    "created_on": "2023-01-02T00:00:00Z"
                }
            ],
            "total_count": 2,
            "offset": 0,
            "limit": 25
        }"#;

        let response: ProjectsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.projects.len(), 2);
        assert_eq!(response.total_count, Some(2));
        assert_eq!(response.projects[0].identifier, "first");
    }

    #[test]
    fn test_parse_issue() {
        let json = r#"{
            "id": 101,
            "project": {"id": 1, "name": "First"},
            "tracker": {"id": 1, "name": "Bug"},
            "status": {"id": 2, "name": "In Progress"},
            "priority": {"id": 4, "name": "Normal"},
            "author": {"id": 5, "name": "Jane Smith"},
            "assigned_to": {"id": 6, "name": "John Doe"},
            "subject": "Login page times out",
            "description": "Steps to reproduce...",
            "done_ratio": 40,
            "due_date": "2024-02-01",
            "created_on": "2024-01-15T10:00:00Z",
            "updated_on": "2024-01-16T14:30:00Z"
        }"#;

        let issue: Issue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.id, 101);
        assert_eq!(issue.subject, "Login page times out");
        assert_eq!(issue.status.name, "In Progress");
        assert_eq!(issue.tracker.name, "Bug");
        assert_eq!(issue.assignee_name(), "John Doe");
        assert_eq!(issue.done_ratio, 40);
        assert_eq!(issue.due_date, NaiveDate::from_ymd_opt(2024, 2, 1));
    }

    #[test]
    fn test_parse_issue_minimal() {
        let json = r#"{
            "id": 102,
            "project": {"id": 1, "name": "First"},
            "tracker": {"id": 2, "name": "Feature"},
            "status": {"id": 1, "name": "New"},
            "priority": {"id": 4, "name": "Normal"},
            "author": {"id": 5, "name": "Jane Smith"},
            "subject": "Add dark mode",
            "created_on": "2024-01-15T10:00:00Z",
            "updated_on": "2024-01-15T10:00:00Z"
        }"#;

        let issue: Issue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.assignee_name(), "Unassigned");
        assert_eq!(issue.description_text(), "");
        assert_eq!(issue.done_ratio, 0);
        assert!(issue.due_date.is_none());
    }

    #[test]
    fn test_parse_issues_response() {
        let json = r#"{
            "issues": [
                {
                    "id": 101,
                    "project": {"id": 1, "name": "First"},
                    "tracker": {"id": 1, "name": "Bug"},
                    "status": {"id": 1, "name": "New"},
                    "priority": {"id": 4, "name": "Normal"},
                    "author": {"id": 5, "name": "Jane Smith"},
                    "subject": "One",
                    "created_on": "2024-01-15T10:00:00Z",
                    "updated_on": "2024-01-15T10:00:00Z"
                }
            ],
            "total_count": 37,
            "offset": 0,
            "limit": 1
        }"#;

        let response: IssuesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.issues.len(), 1);
        assert_eq!(response.total_count, Some(37));
        assert_eq!(response.offset, Some(0));
        assert_eq!(response.limit, Some(1));
    }

    #[test]
    fn test_parse_current_user() {
        let json = r#"{
            "id": 5,
            "login": "jsmith",
            "firstname": "Jane",
            "lastname": "Smith",
            "mail": "jane@example.com",
            "api_key": "0123456789abcdef",
            "created_on": "2022-06-01T08:00:00Z"
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.login, "jsmith");
        assert_eq!(user.name(), "Jane Smith");
        assert_eq!(user.api_key.as_deref(), Some("0123456789abcdef"));
    }

    #[test]
    fn test_user_name_falls_back_to_login() {
        let json = r#"{"id": 5, "login": "jsmith"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.name(), "jsmith");
    }

    #[test]
    fn test_user_debug_redacts_api_key() {
        let json = r#"{"id": 5, "login": "jsmith", "api_key": "topsecretkey"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        let debug_output = format!("{:?}", user);
        assert!(!debug_output.contains("topsecretkey"));
        assert!(debug_output.contains("<redacted>"));
    }

    #[test]
    fn test_entity_display() {
        let entity = Entity {
            id: 1,
            name: "Bug".to_string(),
        };
        assert_eq!(format!("{}", entity), "Bug");
    }

    #[test]
    fn test_issue_display() {
        let json = r#"{
            "id": 101,
            "project": {"id": 1, "name": "First"},
            "tracker": {"id": 1, "name": "Bug"},
            "status": {"id": 1, "name": "New"},
            "priority": {"id": 4, "name": "Normal"},
            "author": {"id": 5, "name": "Jane Smith"},
            "subject": "Broken build",
            "created_on": "2024-01-15T10:00:00Z",
            "updated_on": "2024-01-15T10:00:00Z"
        }"#;
        let issue: Issue = serde_json::from_str(json).unwrap();
        assert_eq!(format!("{}", issue), "#101: Broken build");
    }

    #[test]
    fn test_filter_default_query() {
        let filter = IssueFilter {
            limit: 25,
            ..Default::default()
        };
        assert_eq!(filter.to_query(), "limit=25&status_id=open");
    }

    #[test]
    fn test_filter_full_query() {
        let filter = IssueFilter {
            project: Some(12),
            assignee: Some(Assignee::Me),
            status: StatusFilter::All,
            subject: Some("login page".to_string()),
            limit: 50,
        };
        assert_eq!(
            filter.to_query(),
            "limit=50&status_id=*&assigned_to_id=me&project_id=12&subject=~login%20page"
        );
    }

    #[test]
    fn test_filter_assignee_id() {
        let filter = IssueFilter {
            assignee: Some(Assignee::Id(7)),
            status: StatusFilter::Closed,
            limit: 10,
            ..Default::default()
        };
        assert_eq!(filter.to_query(), "limit=10&status_id=closed&assigned_to_id=7");
    }
}
