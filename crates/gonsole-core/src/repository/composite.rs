//! Repository provider over a fixed list of known repositories

use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tracing::info;

use super::RepositoryProvider;
use crate::error::{ConsoleError, ConsoleResult};

/// Ordered set of repositories with one of them selected as current
#[derive(Debug)]
pub struct CompositeRepositoryProvider {
    locations: Vec<PathBuf>,
    current: RwLock<usize>,
}

impl CompositeRepositoryProvider {
    /// Create a provider; the first location becomes current
    pub fn new(locations: Vec<PathBuf>) -> ConsoleResult<Self> {
        if locations.is_empty() {
            return Err(ConsoleError::config(
                "at least one repository location is required",
            ));
        }
        Ok(Self {
            locations,
            current: RwLock::new(0),
        })
    }
}

impl RepositoryProvider for CompositeRepositoryProvider {
    fn current_repository_location(&self) -> PathBuf {
        self.locations[*self.current.read()].clone()
    }

    fn repository_locations(&self) -> Vec<PathBuf> {
        self.locations.clone()
    }

    fn set_current_repository_location(&self, location: &Path) -> ConsoleResult<()> {
        let index = self
            .locations
            .iter()
            .position(|known| known == location)
            .ok_or_else(|| {
                ConsoleError::other(format!("Unknown repository: {}", location.display()))
            })?;
        *self.current.write() = index;
        info!("Current repository is now {}", location.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> CompositeRepositoryProvider {
        CompositeRepositoryProvider::new(vec![
            PathBuf::from("/work/alpha/.git"),
            PathBuf::from("/work/beta"),
        ])
        .unwrap()
    }

    #[test]
    fn test_first_location_is_current() {
        assert_eq!(
            provider().current_repository_location(),
            PathBuf::from("/work/alpha/.git")
        );
    }

    #[test]
    fn test_empty_provider_is_rejected() {
        assert!(CompositeRepositoryProvider::new(Vec::new()).is_err());
    }

    #[test]
    fn test_switch_is_visible_immediately() {
        let provider = provider();
        provider
            .set_current_repository_location(Path::new("/work/beta"))
            .unwrap();
        assert_eq!(
            provider.current_repository_location(),
            PathBuf::from("/work/beta")
        );
    }

    #[test]
    fn test_switch_to_unknown_location_keeps_current() {
        let provider = provider();
        assert!(provider
            .set_current_repository_location(Path::new("/elsewhere"))
            .is_err());
        assert_eq!(
            provider.current_repository_location(),
            PathBuf::from("/work/alpha/.git")
        );
    }
}
