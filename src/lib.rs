// repodeck: track GitHub repositories and browse their issues page by page.
//
// `RepositoryStore` keeps the persisted list of tracked repositories and
// `IssueBrowser` pages through one repository's issues. Both reach GitHub
// through the `RepositoryApi` trait, implemented by `GitHubClient`.

pub mod error;
pub mod github;
pub mod state;
pub mod storage;

#[cfg(test)]
mod testing;

pub use error::{RepodeckError, Result};
pub use github::{ClientConfig, GitHubClient, RepositoryApi};
pub use state::{
    BrowserSession, FetchOutcome, FetchRequest, IssueBrowser, IssuePage, PageDirection,
    RepositoryStore, SessionStatus, TrackedRepository,
};
pub use storage::{FileStorage, MemoryStorage, Storage};
