// In-memory repository API used by unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::error::{RepodeckError, Result};
use crate::github::{Issue, IssueQuery, Label, Owner, RepositoryApi, RepositoryInfo};

/// Fake API that resolves names case-insensitively to their canonical form,
/// serves canned issue pages, and records every call.
#[derive(Default)]
pub(crate) struct FakeApi {
    repositories: HashMap<String, RepositoryInfo>,
    pages: HashMap<u32, Vec<Issue>>,
    issue_failure: Mutex<Option<String>>,
    repository_gate: Option<Notify>,
    repository_calls: AtomicUsize,
    issue_queries: Mutex<Vec<IssueQuery>>,
}

impl FakeApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_repository(mut self, full_name: &str) -> Self {
        self.repositories
            .insert(full_name.to_lowercase(), repository(full_name));
        self
    }

    pub(crate) fn with_page(mut self, page: u32, titles: &[&str]) -> Self {
        let issues = titles
            .iter()
            .enumerate()
            .map(|(i, title)| issue(u64::from(page) * 100 + i as u64, title))
            .collect();
        self.pages.insert(page, issues);
        self
    }

    /// Make `fetch_repository` wait for [`FakeApi::release`] before answering.
    pub(crate) fn gated(mut self) -> Self {
        self.repository_gate = Some(Notify::new());
        self
    }

    pub(crate) fn release(&self) {
        if let Some(gate) = &self.repository_gate {
            gate.notify_one();
        }
    }

    pub(crate) fn fail_issues(&self, message: Option<&str>) {
        *self.issue_failure.lock() = message.map(str::to_string);
    }

    pub(crate) fn repository_calls(&self) -> usize {
        self.repository_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn issue_queries(&self) -> Vec<IssueQuery> {
        self.issue_queries.lock().clone()
    }
}

#[async_trait]
impl RepositoryApi for FakeApi {
    async fn fetch_repository(&self, name: &str) -> Result<RepositoryInfo> {
        self.repository_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.repository_gate {
            gate.notified().await;
        }

        self.repositories
            .get(&name.to_lowercase())
            .cloned()
            .ok_or_else(|| RepodeckError::NotFound(format!("/repos/{}", name)))
    }

    async fn fetch_issues(&self, _name: &str, query: &IssueQuery) -> Result<Vec<Issue>> {
        self.issue_queries.lock().push(*query);
        let failure = self.issue_failure.lock().clone();
        if let Some(message) = failure {
            return Err(RepodeckError::Network(message));
        }

        Ok(self.pages.get(&query.page).cloned().unwrap_or_default())
    }
}

pub(crate) fn repository(full_name: &str) -> RepositoryInfo {
    let login = full_name.split('/').next().unwrap_or(full_name);
    RepositoryInfo {
        full_name: full_name.to_string(),
        description: Some(format!("{} description", full_name)),
        owner: Owner {
            login: login.to_string(),
            avatar_url: Some(format!("https://avatars.example/{}", login)),
        },
    }
}

pub(crate) fn issue(id: u64, title: &str) -> Issue {
    Issue {
        id,
        title: title.to_string(),
        html_url: format!("https://github.example/issues/{}", id),
        author: Some(Owner {
            login: "octocat".to_string(),
            avatar_url: None,
        }),
        labels: vec![Label {
            id: 1,
            name: "bug".to_string(),
        }],
    }
}
