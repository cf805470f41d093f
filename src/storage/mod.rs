// Storage module for durable local state.
// Persists the tracked repository list between runs.

pub mod paths;
pub mod store;

pub use paths::data_dir;
pub use store::{FileStorage, MemoryStorage, Storage};
