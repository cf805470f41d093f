// Tracked repository store.
// Validates new repositories against the API and persists the list on every change.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info, warn};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::{RepodeckError, Result};
use crate::github::RepositoryApi;
use crate::storage::Storage;

/// Storage key holding the tracked repository list.
pub const REPOSITORIES_KEY: &str = "repositories";

/// A repository the user tracks, keyed by its canonical `owner/repo` name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackedRepository {
    pub name: String,
}

impl TrackedRepository {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Tracked repositories in insertion order.
pub type RepositoryList = Vec<TrackedRepository>;

/// Owns the deduplicated, persisted list of tracked repositories.
///
/// Every mutation writes the full list back to storage before returning.
/// A failed write undoes the mutation, so the in-memory list always matches
/// what was last persisted.
pub struct RepositoryStore {
    api: Arc<dyn RepositoryApi>,
    storage: Arc<dyn Storage>,
    repositories: Mutex<RepositoryList>,
    submitting: AtomicBool,
}

impl RepositoryStore {
    /// Create an empty store. Call [`RepositoryStore::initialize`] to load saved state.
    pub fn new(api: Arc<dyn RepositoryApi>, storage: Arc<dyn Storage>) -> Self {
        Self {
            api,
            storage,
            repositories: Mutex::new(Vec::new()),
            submitting: AtomicBool::new(false),
        }
    }

    /// Load the saved list. Missing or unreadable state starts an empty list.
    pub fn initialize(&self) {
        let loaded = match self.storage.load(REPOSITORIES_KEY) {
            Ok(Some(bytes)) => match decode(&bytes) {
                Ok(repositories) => {
                    info!("Loaded {} tracked repositories", repositories.len());
                    repositories
                }
                Err(e) => {
                    warn!("Failed to parse tracked repositories, starting fresh: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => {
                debug!("No tracked repositories saved, starting fresh");
                Vec::new()
            }
            Err(e) => {
                warn!("Failed to read tracked repositories, starting fresh: {}", e);
                Vec::new()
            }
        };

        *self.repositories.lock() = loaded;
    }

    /// Validate `candidate` against the API and start tracking it.
    ///
    /// Rejects empty input and already tracked names without touching the
    /// network. Only one submission may be in flight; a concurrent call fails
    /// with [`RepodeckError::Busy`]. The stored name is the API's canonical
    /// `full_name`, which may differ in case from the input.
    pub async fn submit(&self, candidate: &str) -> Result<TrackedRepository> {
        let candidate = candidate.trim();
        if candidate.is_empty() {
            return Err(RepodeckError::Validation("empty name".to_string()));
        }
        if self.contains(candidate) {
            return Err(RepodeckError::Duplicate(candidate.to_string()));
        }

        let _submitting = SubmitGuard::acquire(&self.submitting)?;
        let repository = match self.api.fetch_repository(candidate).await {
            Ok(repository) => repository,
            Err(e) => {
                warn!("Lookup of {} failed: {}", candidate, e);
                return Err(e);
            }
        };

        let tracked = TrackedRepository::new(repository.full_name);
        let mut repositories = self.repositories.lock();
        if repositories.iter().any(|r| r.name == tracked.name) {
            return Err(RepodeckError::Duplicate(tracked.name));
        }

        repositories.push(tracked.clone());
        if let Err(e) = self.persist(&repositories) {
            repositories.pop();
            return Err(e);
        }

        info!("Tracking {}", tracked.name);
        Ok(tracked)
    }

    /// Stop tracking `name`. Returns false if it was not tracked.
    pub fn remove(&self, name: &str) -> Result<bool> {
        let mut repositories = self.repositories.lock();
        let Some(index) = repositories.iter().position(|r| r.name == name) else {
            return Ok(false);
        };

        let removed = repositories.remove(index);
        if let Err(e) = self.persist(&repositories) {
            repositories.insert(index, removed);
            return Err(e);
        }

        info!("Stopped tracking {}", name);
        Ok(true)
    }

    /// Snapshot of the tracked repositories.
    pub fn list(&self) -> RepositoryList {
        self.repositories.lock().clone()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.repositories.lock().iter().any(|r| r.name == name)
    }

    pub fn len(&self) -> usize {
        self.repositories.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.repositories.lock().is_empty()
    }

    /// Whether a submission is waiting on the API.
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    fn persist(&self, repositories: &[TrackedRepository]) -> Result<()> {
        let json = serde_json::to_vec_pretty(repositories)?;
        self.storage.save(REPOSITORIES_KEY, &json).inspect_err(|e| {
            warn!("Failed to save tracked repositories: {}", e);
        })?;
        debug!("Saved {} tracked repositories", repositories.len());
        Ok(())
    }
}

/// Decode a saved list, keeping the first occurrence of any repeated name.
fn decode(bytes: &[u8]) -> Result<RepositoryList> {
    let saved: RepositoryList = serde_json::from_slice(bytes)?;
    let mut seen = HashSet::new();
    Ok(saved
        .into_iter()
        .filter(|r| seen.insert(r.name.clone()))
        .collect())
}

/// Holds the submitting flag for the duration of one submission.
struct SubmitGuard<'a>(&'a AtomicBool);

impl<'a> SubmitGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| RepodeckError::Busy)?;
        Ok(Self(flag))
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
