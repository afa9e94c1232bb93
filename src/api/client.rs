//! Redmine API client implementation.
//!
//! This module provides the main client for interacting with the Redmine
//! REST API. It handles authentication, request/response processing, and
//! error mapping. Failed requests are reported as-is; there is no retry
//! or caching layer.

use std::time::Duration;

use reqwest::{header, Client, Response, StatusCode};
use tracing::{debug, error, info, instrument, warn};

use super::auth::{self, Auth};
use super::error::{ApiError, Result};
use super::types::{
    Issue, IssueFilter, IssueResponse, IssuesResponse, Project, ProjectResponse,
    ProjectsResponse, User, UserResponse,
};
use crate::config::Config;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The Redmine API client.
///
/// Provides async methods for reading projects, issues, and the current
/// user from a Redmine server.
#[derive(Debug)]
pub struct RedmineClient {
    /// The HTTP client.
    client: Client,
    /// The base URL for the Redmine instance.
    base_url: String,
    /// Authentication credentials.
    auth: Auth,
}

impl RedmineClient {
    /// Create a new client from the stored configuration.
    ///
    /// Retrieves the API key from the OS keyring using the configured
    /// login. Does not perform any network I/O.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The API key cannot be retrieved from the keyring
    /// - The HTTP client cannot be built
    #[instrument(skip(config), fields(url = %config.url))]
    pub fn new(config: &Config) -> Result<Self> {
        let auth = Auth::from_keyring(&config.login)?;
        Self::build(&config.url, auth)
    }

    /// Create a new client with an explicit API key.
    ///
    /// Use this for tests or during `login` before the key is persisted.
    pub fn with_key(base_url: &str, api_key: &str) -> Result<Self> {
        Self::build(base_url, Auth::new(api_key))
    }

    fn build(base_url: &str, auth: Auth) -> Result<Self> {
        let client = build_http_client()?;
        let base_url = normalize_base_url(base_url);

        Ok(Self {
            client,
            base_url,
            auth,
        })
    }

    /// Exchange login and password for the account record.
    ///
    /// Calls `GET /users/current.json` with Basic Auth; the response
    /// carries the account's API key, which the caller is expected to
    /// store in the keyring. This is the only call that uses the
    /// password; everything else authenticates with the key.
    #[instrument(skip_all, fields(url = %base_url, login = %login))]
    pub async fn login(base_url: &str, login: &str, password: &str) -> Result<User> {
        info!("Fetching API key via Basic Auth");

        let client = build_http_client()?;
        let base_url = normalize_base_url(base_url);
        let url = format!("{}/users/current.json", base_url);

        let response = client
            .get(&url)
            .header(header::AUTHORIZATION, auth::basic_auth_header(login, password))
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let wrapped: UserResponse = read_response(response).await?;
        Ok(wrapped.user)
    }

    /// Validate the connection by fetching the current user.
    ///
    /// This verifies that the URL is reachable and the API key is valid.
    #[instrument(skip(self))]
    pub async fn validate_connection(&self) -> Result<User> {
        debug!("Validating Redmine connection");

        let user = self.current_user().await.map_err(|e| {
            error!("Connection validation failed: {}", e);
            match e {
                ApiError::Unauthorized => e,
                ApiError::Network(ref _err) => {
                    ApiError::ConnectionFailed(format!("Cannot connect to {}: {}", self.base_url, e))
                }
                _ => ApiError::ConnectionFailed(e.to_string()),
            }
        })?;

        info!("Connected as user: {}", user.login);
        Ok(user)
    }

    /// Get the current authenticated user.
    ///
    /// Calls `GET /users/current.json`.
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> Result<User> {
        let url = format!("{}/users/current.json", self.base_url);
        let response: UserResponse = self.get(&url).await?;
        Ok(response.user)
    }

    /// List projects visible to the current user.
    ///
    /// Calls `GET /projects.json`.
    #[instrument(skip(self))]
    pub async fn get_projects(&self, limit: u32) -> Result<Vec<Project>> {
        let url = format!("{}/projects.json?limit={}", self.base_url, limit);
        let response: ProjectsResponse = self.get(&url).await?;
        debug!("Fetched {} projects", response.projects.len());
        Ok(response.projects)
    }

    /// Get a single project by ID.
    ///
    /// Calls `GET /projects/{id}.json`.
    #[instrument(skip(self), fields(project_id = %id))]
    pub async fn get_project(&self, id: i64) -> Result<Project> {
        let url = format!("{}/projects/{}.json", self.base_url, id);
        let response: ProjectResponse = self.get(&url).await.map_err(|e| {
            if matches!(e, ApiError::NotFound(_)) {
                ApiError::NotFound(format!("project {}", id))
            } else {
                e
            }
        })?;

        Ok(response.project)
    }

    /// List issues matching a filter.
    ///
    /// Calls `GET /issues.json` with the filter's query string.
    #[instrument(skip(self, filter))]
    pub async fn get_issues(&self, filter: &IssueFilter) -> Result<IssuesResponse> {
        let url = format!("{}/issues.json?{}", self.base_url, filter.to_query());
        let response: IssuesResponse = self.get(&url).await?;
        debug!(
            "Fetched {} issues (total: {:?})",
            response.issues.len(),
            response.total_count
        );
        Ok(response)
    }

    /// Get a single issue by ID.
    ///
    /// Calls `GET /issues/{id}.json`.
    #[instrument(skip(self), fields(issue_id = %id))]
    pub async fn get_issue(&self, id: i64) -> Result<Issue> {
        let url = format!("{}/issues/{}.json", self.base_url, id);
        let response: IssueResponse = self.get(&url).await.map_err(|e| {
            if matches!(e, ApiError::NotFound(_)) {
                ApiError::NotFound(format!("issue #{}", id))
            } else {
                e
            }
        })?;

        Ok(response.issue)
    }

    /// Perform a GET request with API key authentication.
    #[instrument(skip(self), fields(url = %url))]
    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .header("X-Redmine-API-Key", self.auth.header_value())
            .header(header::ACCEPT, "application/json")
            .header(header::CONTENT_TYPE, "application/json")
            .send()
            .await?;

        read_response(response).await
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Build the HTTP client with appropriate settings.
fn build_http_client() -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
        .build()
        .map_err(ApiError::Network)
}

/// Handle an HTTP response, checking for errors and parsing JSON.
async fn read_response<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let url = response.url().to_string();

    if status.is_success() {
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))
    } else {
        let error_body = response.text().await.unwrap_or_default();
        debug!("Error response body: {}", error_body);

        Err(error_from_response(status, &url, &error_body))
    }
}

/// Create an appropriate error from an HTTP response.
///
/// Redmine reports failures as `{"errors": ["message", ...]}`; those
/// messages are folded into the error context when present.
fn error_from_response(status: StatusCode, url: &str, body: &str) -> ApiError {
    let context = if body.is_empty() {
        url.to_string()
    } else {
        match serde_json::from_str::<serde_json::Value>(body) {
            Ok(json) => {
                let messages: Vec<&str> = json
                    .get("errors")
                    .and_then(|e| e.as_array())
                    .map(|arr| arr.iter().filter_map(|v| v.as_str()).collect())
                    .unwrap_or_default();

                if messages.is_empty() {
                    url.to_string()
                } else {
                    messages.join(", ")
                }
            }
            Err(_) => url.to_string(),
        }
    };

    ApiError::from_status(status, &context)
}

/// Normalize the base URL by removing trailing slashes.
fn normalize_base_url(url: &str) -> String {
    let url = url.trim_end_matches('/');

    // Warn if not HTTPS (but don't enforce for localhost/testing)
    if !url.starts_with("https://") && !url.contains("localhost") {
        warn!("URL does not use HTTPS: {}. This is insecure for production use.", url);
    }

    url.to_string()
}
