// GitHub API response types.
// Defines structs for deserializing repository and issue responses.

use serde::{Deserialize, Serialize};

/// Issue state filter for the issues endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
    #[default]
    All,
}

/// GitHub user or organization, as embedded in repositories and issues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub login: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Raw repository payload. Fields the detail view depends on are optional
/// here so an unexpected shape becomes a `NotFound` instead of a decode panic.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RepositoryResponse {
    pub full_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub owner: Option<OwnerResponse>,
}

/// Raw owner payload inside a repository response.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct OwnerResponse {
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Repository metadata shown in the detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryInfo {
    /// Canonical `owner/repo` identifier.
    pub full_name: String,
    pub description: Option<String>,
    pub owner: Owner,
}

/// Issue label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub id: u64,
    pub name: String,
}

/// Issue (or pull request) as returned by the issues listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: u64,
    pub title: String,
    pub html_url: String,
    /// `None` when the author account was deleted.
    #[serde(rename = "user", default)]
    pub author: Option<Owner>,
    #[serde(default)]
    pub labels: Vec<Label>,
}

/// Query parameters for one page of the issues listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IssueQuery {
    pub state: IssueState,
    pub per_page: u32,
    /// 1-based page number.
    pub page: u32,
}

impl IssueQuery {
    /// Query for the given page with the browser's fixed state and page size.
    pub fn page(page: u32) -> Self {
        Self {
            state: IssueState::All,
            per_page: super::ISSUES_PER_PAGE,
            page,
        }
    }
}

/// Rate limit information from response headers.
#[derive(Debug, Clone, Default)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    pub reset: u64,
}

impl RateLimit {
    /// True once the headers have reported a limit and nothing remains of it.
    pub fn is_exhausted(&self) -> bool {
        self.limit > 0 && self.remaining == 0
    }
}
