// State management module.
// Tracked repository list and the issue browser session.

pub mod browser;
pub mod repositories;
pub mod session;

pub use browser::{FetchOutcome, FetchRequest, IssueBrowser, PageDirection};
pub use repositories::{REPOSITORIES_KEY, RepositoryList, RepositoryStore, TrackedRepository};
pub use session::{BrowserSession, IssuePage, SessionStatus};
