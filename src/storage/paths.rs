// Storage path utilities.
// Resolves the data directory and maps storage keys to file names.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

/// Get the base data directory (~/.local/share/repodeck on Linux).
pub fn data_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "repodeck").map(|dirs| dirs.data_dir().to_path_buf())
}

/// Path of the file holding `key` inside `dir`.
pub fn key_path(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{}.json", sanitize_name(key)))
}

/// Sanitize a name for use in filesystem paths.
/// Replaces problematic characters with underscores.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '.' => '_',
            _ => c,
        })
        .collect()
}
