// Repository API port.
// The store and the issue browser reach GitHub only through this trait.

use async_trait::async_trait;
use log::debug;

use crate::error::Result;

use super::client::GitHubClient;
use super::types::{Issue, IssueQuery, RepositoryInfo};

/// Read-only access to repositories and their issues.
///
/// Implementations must be `Send + Sync` so a single client can be shared
/// between the store and the browser behind an `Arc`.
#[async_trait]
pub trait RepositoryApi: Send + Sync {
    /// Look up a repository by `owner/repo` name.
    ///
    /// Returns `NotFound` when the repository does not exist or the payload
    /// lacks the fields needed to describe it.
    async fn fetch_repository(&self, name: &str) -> Result<RepositoryInfo>;

    /// Fetch one page of issues, in the order the API returns them.
    ///
    /// A page past the end yields an empty vector, not an error.
    async fn fetch_issues(&self, name: &str, query: &IssueQuery) -> Result<Vec<Issue>>;
}

#[async_trait]
impl RepositoryApi for GitHubClient {
    async fn fetch_repository(&self, name: &str) -> Result<RepositoryInfo> {
        debug!("Fetching repository {}", name);
        self.get_repository(name).await
    }

    async fn fetch_issues(&self, name: &str, query: &IssueQuery) -> Result<Vec<Issue>> {
        debug!(
            "Fetching issues for {} (state={:?}, page={}, per_page={})",
            name, query.state, query.page, query.per_page
        );
        let issues = self.list_issues(name, query).await?;
        debug!("Fetched {} issues for {} page {}", issues.len(), name, query.page);
        Ok(issues)
    }
}
