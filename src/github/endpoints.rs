// GitHub API endpoint functions.
// Provides typed methods for the repository and issues endpoints.

use log::debug;

use crate::error::{RepodeckError, Result};

use super::client::GitHubClient;
use super::types::{Issue, IssueQuery, Owner, RepositoryInfo, RepositoryResponse};

impl GitHubClient {
    /// Get a repository by its `owner/repo` name.
    pub async fn get_repository(&self, name: &str) -> Result<RepositoryInfo> {
        let endpoint = format!("/repos/{}", name);
        let response = self.get(&endpoint).await?;
        let body = response.bytes().await?;
        let repository: RepositoryResponse = serde_json::from_slice(&body).map_err(|e| {
            debug!("Unexpected repository payload from {}: {}", endpoint, e);
            RepodeckError::NotFound(endpoint.clone())
        })?;
        repository_info(repository, &endpoint)
    }

    /// Get one page of issues for a repository.
    pub async fn list_issues(&self, name: &str, query: &IssueQuery) -> Result<Vec<Issue>> {
        let response = self
            .get_with_params(&format!("/repos/{}/issues", name), query)
            .await?;
        let issues: Vec<Issue> = response.json().await?;
        Ok(issues)
    }
}

/// Convert a raw repository payload, treating a missing name, owner, or
/// owner login as absent.
fn repository_info(response: RepositoryResponse, endpoint: &str) -> Result<RepositoryInfo> {
    let owner = response.owner.and_then(|owner| {
        owner.login.map(|login| Owner {
            login,
            avatar_url: owner.avatar_url,
        })
    });

    match (response.full_name, owner) {
        (Some(full_name), Some(owner)) => Ok(RepositoryInfo {
            full_name,
            description: response.description,
            owner,
        }),
        _ => Err(RepodeckError::NotFound(endpoint.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::types::OwnerResponse;

    #[test]
    fn test_repository_info_complete() {
        let response = RepositoryResponse {
            full_name: Some("rust-lang/rust".to_string()),
            description: Some("Empowering everyone".to_string()),
            owner: Some(OwnerResponse {
                login: Some("rust-lang".to_string()),
                avatar_url: None,
            }),
        };

        let info = repository_info(response, "/repos/rust-lang/rust").unwrap();
        assert_eq!(info.full_name, "rust-lang/rust");
        assert_eq!(info.owner.login, "rust-lang");
    }

    #[test]
    fn test_repository_info_missing_owner_is_not_found() {
        let response = RepositoryResponse {
            full_name: Some("rust-lang/rust".to_string()),
            description: None,
            owner: None,
        };

        let err = repository_info(response, "/repos/rust-lang/rust").unwrap_err();
        assert!(matches!(err, RepodeckError::NotFound(path) if path == "/repos/rust-lang/rust"));
    }

    #[test]
    fn test_repository_info_missing_name_is_not_found() {
        let response = RepositoryResponse {
            full_name: None,
            description: None,
            owner: Some(OwnerResponse {
                login: Some("octocat".to_string()),
                avatar_url: None,
            }),
        };

        assert!(matches!(
            repository_info(response, "/repos/octocat/x"),
            Err(RepodeckError::NotFound(_))
        ));
    }

    #[test]
    fn test_repository_info_owner_without_login_is_not_found() {
        let response = RepositoryResponse {
            full_name: Some("octocat/hello".to_string()),
            description: None,
            owner: Some(OwnerResponse::default()),
        };

        assert!(matches!(
            repository_info(response, "/repos/octocat/hello"),
            Err(RepodeckError::NotFound(_))
        ));
    }
}
