//! Repository locations the console operates on

mod composite;

pub use composite::CompositeRepositoryProvider;

use std::path::{Path, PathBuf};

use crate::error::ConsoleResult;

/// Name of the metadata directory inside a work tree
const GIT_DIR_NAME: &str = ".git";

/// Source of the current repository location.
///
/// Implementations must be cheap to query: the console reads the location on
/// every prompt and never caches it.
pub trait RepositoryProvider: Send + Sync {
    /// The repository pass-through commands run against
    fn current_repository_location(&self) -> PathBuf;

    /// All repositories the user can switch between
    fn repository_locations(&self) -> Vec<PathBuf>;

    /// Make `location` current; it must be one of the known locations
    fn set_current_repository_location(&self, location: &Path) -> ConsoleResult<()>;
}

/// Display name of a repository.
///
/// For a `.git` metadata directory this is the name of the enclosing work
/// tree, otherwise the last path component.
pub fn repository_name(location: &Path) -> String {
    let named = work_tree(location);
    named
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| named.display().to_string())
}

/// Find a repository among `locations` by display name or by path
pub fn find_repository(locations: &[PathBuf], name_or_path: &str) -> Option<PathBuf> {
    let as_path = Path::new(name_or_path);
    locations
        .iter()
        .find(|location| repository_name(location) == name_or_path)
        .or_else(|| locations.iter().find(|location| location.as_path() == as_path))
        .cloned()
}

/// Directory git should run in for a repository location
pub fn work_tree(location: &Path) -> &Path {
    if location.file_name().is_some_and(|name| name == GIT_DIR_NAME) {
        location.parent().unwrap_or(location)
    } else {
        location
    }
}
