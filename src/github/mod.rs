// GitHub API module.
// Provides the repository API port, its reqwest-backed client, and wire types.

pub mod api;
pub mod client;
pub mod endpoints;
pub mod types;

pub use api::RepositoryApi;
pub use client::{ClientConfig, GitHubClient};
pub use types::*;

/// Number of issues requested per page by the issue browser.
pub const ISSUES_PER_PAGE: u32 = 5;
