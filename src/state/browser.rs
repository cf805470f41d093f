// Issue browser.
// Pages through issues; only the newest tagged request may update the session.

use std::sync::Arc;

use log::{debug, warn};
use parking_lot::Mutex;

use crate::github::{IssueQuery, RepositoryApi};

use super::session::{BrowserSession, IssuePage, SessionStatus};

/// Direction of a page change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Previous,
    Next,
}

impl PageDirection {
    /// Page reached from `current`, or `None` when it would fall below page 1.
    pub fn apply(self, current: u32) -> Option<u32> {
        match self {
            PageDirection::Previous => current.checked_sub(1).filter(|page| *page >= 1),
            PageDirection::Next => current.checked_add(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchKind {
    /// Repository metadata plus the first issue page.
    Initial,
    /// A single issue page.
    Page,
}

/// A fetch that has been issued but not yet resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    tag: u64,
    kind: FetchKind,
    repository_name: String,
    page: u32,
}

impl FetchRequest {
    pub fn tag(&self) -> u64 {
        self.tag
    }

    pub fn repository_name(&self) -> &str {
        &self.repository_name
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn is_initial(&self) -> bool {
        self.kind == FetchKind::Initial
    }
}

/// What happened to a resolved fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response (success or failure) was applied to the session.
    Applied,
    /// A newer request was issued meanwhile, so the response was discarded.
    Superseded,
}

#[derive(Debug, Default)]
struct BrowserState {
    session: Option<BrowserSession>,
    last_tag: u64,
}

/// Browses the issues of one repository at a time.
///
/// Fetching happens in two steps. [`IssueBrowser::open`] and
/// [`IssueBrowser::go_to_page`] update the session immediately and hand back
/// a [`FetchRequest`] tagged from a browser-wide counter.
/// [`IssueBrowser::resolve`] performs the network call and applies the
/// response only if its tag is still the session's newest one. Responses for
/// a closed or replaced session are dropped.
pub struct IssueBrowser {
    api: Arc<dyn RepositoryApi>,
    state: Mutex<BrowserState>,
}

impl IssueBrowser {
    pub fn new(api: Arc<dyn RepositoryApi>) -> Self {
        Self {
            api,
            state: Mutex::new(BrowserState::default()),
        }
    }

    /// Open `repository_name` on page 1, replacing any open session.
    pub fn open(&self, repository_name: &str) -> FetchRequest {
        begin_session(&mut self.state.lock(), repository_name)
    }

    /// Move one page back or forward.
    ///
    /// Returns `None` without touching the session when nothing is open, the
    /// initial load has not completed, or the move would go below page 1.
    /// There is no upper bound; a page past the end loads as an empty page.
    /// From `Failed` this acts as a retry.
    pub fn go_to_page(&self, direction: PageDirection) -> Option<FetchRequest> {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        let session = state.session.as_mut()?;
        if matches!(
            session.status,
            SessionStatus::Idle | SessionStatus::LoadingInitial
        ) || !session.has_loaded()
        {
            return None;
        }

        let page = direction.apply(session.requested_page)?;
        state.last_tag += 1;
        Some(issue_page(session, state.last_tag, page))
    }

    /// Re-issue whatever the session failed to load.
    ///
    /// A failed initial load repeats the full initial fetch; a failed page
    /// load requests the failed page again. Returns `None` unless the session
    /// is `Failed`.
    pub fn retry(&self) -> Option<FetchRequest> {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        let session = state.session.as_mut()?;
        if session.status != SessionStatus::Failed {
            return None;
        }

        if !session.has_loaded() {
            let repository_name = session.repository_name.clone();
            return Some(begin_session(state, &repository_name));
        }

        let page = session.failed_page.unwrap_or(session.requested_page);
        state.last_tag += 1;
        Some(issue_page(session, state.last_tag, page))
    }

    /// Perform the network call for `request` and apply the result if it is
    /// still the newest request for the open session.
    pub async fn resolve(&self, request: FetchRequest) -> FetchOutcome {
        let name = request.repository_name.as_str();
        let query = IssueQuery::page(request.page);

        match request.kind {
            FetchKind::Initial => {
                let result = tokio::try_join!(
                    self.api.fetch_repository(name),
                    self.api.fetch_issues(name, &query)
                );
                self.apply(&request, |session| match result {
                    Ok((info, items)) => {
                        session.repository_info = Some(info);
                        session.current_page = Some(IssuePage {
                            repository_name: request.repository_name.clone(),
                            page_number: request.page,
                            items,
                        });
                        session.status = SessionStatus::Ready;
                        session.error_message = None;
                    }
                    Err(e) => {
                        warn!("Loading {} failed: {}", request.repository_name, e);
                        session.repository_info = None;
                        session.current_page = None;
                        session.fail(e.to_string());
                    }
                })
            }
            FetchKind::Page => {
                let result = self.api.fetch_issues(name, &query).await;
                self.apply(&request, |session| match result {
                    Ok(items) => {
                        session.current_page = Some(IssuePage {
                            repository_name: request.repository_name.clone(),
                            page_number: request.page,
                            items,
                        });
                        session.failed_page = None;
                        session.status = SessionStatus::Ready;
                        session.error_message = None;
                    }
                    Err(e) => {
                        warn!(
                            "Loading page {} of {} failed: {}",
                            request.page, request.repository_name, e
                        );
                        session.fail_page(request.page, e.to_string());
                    }
                })
            }
        }
    }

    /// Discard the open session. Pending responses for it will be dropped.
    pub fn close(&self) {
        if let Some(session) = self.state.lock().session.take() {
            debug!("Closed browser session for {}", session.repository_name);
        }
    }

    /// Snapshot of the open session.
    pub fn session(&self) -> Option<BrowserSession> {
        self.state.lock().session.clone()
    }

    pub fn can_go_previous(&self) -> bool {
        self.state
            .lock()
            .session
            .as_ref()
            .is_some_and(BrowserSession::can_go_previous)
    }

    fn apply(
        &self,
        request: &FetchRequest,
        update: impl FnOnce(&mut BrowserSession),
    ) -> FetchOutcome {
        let mut state = self.state.lock();
        match state.session.as_mut() {
            Some(session)
                if session.latest_tag == request.tag
                    && session.repository_name == request.repository_name =>
            {
                update(session);
                debug!(
                    "Applied fetch #{} for {} page {}",
                    request.tag, request.repository_name, request.page
                );
                FetchOutcome::Applied
            }
            _ => {
                debug!(
                    "Discarded superseded fetch #{} for {} page {}",
                    request.tag, request.repository_name, request.page
                );
                FetchOutcome::Superseded
            }
        }
    }
}

/// Replace the open session with a fresh one for `repository_name` and build
/// its initial request.
fn begin_session(state: &mut BrowserState, repository_name: &str) -> FetchRequest {
    state.last_tag += 1;

    let mut session = BrowserSession::new(repository_name);
    session.status = SessionStatus::LoadingInitial;
    session.latest_tag = state.last_tag;
    state.session = Some(session);

    let request = FetchRequest {
        tag: state.last_tag,
        kind: FetchKind::Initial,
        repository_name: repository_name.to_string(),
        page: 1,
    };
    debug!("Issued initial fetch #{} for {}", request.tag, repository_name);
    request
}

/// Point `session` at `page` and build the tagged request for it.
fn issue_page(session: &mut BrowserSession, tag: u64, page: u32) -> FetchRequest {
    session.requested_page = page;
    session.failed_page = None;
    session.latest_tag = tag;
    session.status = SessionStatus::LoadingPage;
    session.error_message = None;

    debug!(
        "Issued page fetch #{} for {} page {}",
        tag, session.repository_name, page
    );
    FetchRequest {
        tag,
        kind: FetchKind::Page,
        repository_name: session.repository_name.clone(),
        page,
    }
}
