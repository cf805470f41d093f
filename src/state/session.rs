// Issue browser session state.
// Holds the repository metadata and issue page shown for one open repository.

use crate::github::{Issue, RepositoryInfo};

/// Loading status of a browser session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    #[default]
    Idle,
    /// Waiting for repository metadata and the first issue page.
    LoadingInitial,
    /// Waiting for a different issue page.
    LoadingPage,
    Ready,
    Failed,
}

impl SessionStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionStatus::LoadingInitial | SessionStatus::LoadingPage)
    }
}

/// One page of issues for a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuePage {
    pub repository_name: String,
    /// 1-based page number.
    pub page_number: u32,
    pub items: Vec<Issue>,
}

impl IssuePage {
    /// A page past the last issue is empty, not an error.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Pagination and fetch state for the repository currently open in the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserSession {
    pub repository_name: String,
    pub repository_info: Option<RepositoryInfo>,
    /// Last page that was successfully applied.
    pub current_page: Option<IssuePage>,
    /// Page shown in the pager. Points at the page being loaded while a
    /// fetch is in flight and falls back to the displayed page on failure.
    pub requested_page: u32,
    /// Page whose load failed, kept so a retry asks for it again.
    pub failed_page: Option<u32>,
    pub status: SessionStatus,
    pub error_message: Option<String>,
    /// Sequence tag of the newest fetch issued for this session.
    pub(crate) latest_tag: u64,
}

impl BrowserSession {
    pub(crate) fn new(repository_name: impl Into<String>) -> Self {
        Self {
            repository_name: repository_name.into(),
            repository_info: None,
            current_page: None,
            requested_page: 1,
            failed_page: None,
            status: SessionStatus::Idle,
            error_message: None,
            latest_tag: 0,
        }
    }

    /// Page number the view should show in its pager.
    pub fn page_number(&self) -> u32 {
        self.requested_page
    }

    /// "Previous" is disabled on the first page.
    pub fn can_go_previous(&self) -> bool {
        self.requested_page >= 2
    }

    /// Whether the initial load completed, so page changes are meaningful.
    pub fn has_loaded(&self) -> bool {
        self.repository_info.is_some()
    }

    pub(crate) fn fail(&mut self, message: String) {
        self.status = SessionStatus::Failed;
        self.error_message = Some(message);
    }

    /// Record a failed page load and put the pager back on the page that is
    /// still displayed.
    pub(crate) fn fail_page(&mut self, page: u32, message: String) {
        self.failed_page = Some(page);
        self.requested_page = self
            .current_page
            .as_ref()
            .map_or(1, |displayed| displayed.page_number);
        self.fail(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_starts_on_first_page() {
        let session = BrowserSession::new("octocat/hello");
        assert_eq!(session.page_number(), 1);
        assert_eq!(session.status, SessionStatus::Idle);
        assert!(!session.can_go_previous());
        assert!(!session.has_loaded());
    }

    #[test]
    fn test_fail_sets_message() {
        let mut session = BrowserSession::new("octocat/hello");
        session.fail("Network error: timed out".to_string());
        assert_eq!(session.status, SessionStatus::Failed);
        assert_eq!(
            session.error_message.as_deref(),
            Some("Network error: timed out")
        );
    }

    #[test]
    fn test_fail_page_restores_displayed_page() {
        let mut session = BrowserSession::new("octocat/hello");
        session.current_page = Some(IssuePage {
            repository_name: "octocat/hello".to_string(),
            page_number: 3,
            items: Vec::new(),
        });
        session.requested_page = 4;

        session.fail_page(4, "Network error: timed out".to_string());

        assert_eq!(session.status, SessionStatus::Failed);
        assert_eq!(session.page_number(), 3);
        assert_eq!(session.failed_page, Some(4));
        assert!(session.can_go_previous());
    }

    #[test]
    fn test_fail_page_without_displayed_page() {
        let mut session = BrowserSession::new("octocat/hello");
        session.requested_page = 2;

        session.fail_page(2, "Network error: timed out".to_string());

        assert_eq!(session.page_number(), 1);
        assert_eq!(session.failed_page, Some(2));
    }

    #[test]
    fn test_is_loading() {
        assert!(SessionStatus::LoadingInitial.is_loading());
        assert!(SessionStatus::LoadingPage.is_loading());
        assert!(!SessionStatus::Ready.is_loading());
        assert!(!SessionStatus::Failed.is_loading());
    }
}
