//! Repository root discovery.
//!
//! The provider needs two read-only paths: the repository root (working
//! directory of every git invocation) and the content directory operations are
//! usually aimed at. A [`RepositoryLocator`] resolves both once during init.

use crate::core::error::{ProviderError, Result};
use git2::Repository;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryPaths {
    pub root: PathBuf,
    pub content_dir: PathBuf,
}

impl RepositoryPaths {
    pub fn new(root: impl Into<PathBuf>, content_dir: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            content_dir: content_dir.into(),
        }
    }

    /// Root doubles as the content directory
    pub fn at_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            content_dir: root.clone(),
            root,
        }
    }
}

pub trait RepositoryLocator: Send + Sync {
    fn locate(&self, start: &Path) -> Result<RepositoryPaths>;
}

/// Finds the enclosing repository with git2
#[derive(Debug, Clone, Default)]
pub struct Git2Locator {
    content_subdir: Option<PathBuf>,
}

impl Git2Locator {
    pub fn new(content_subdir: Option<PathBuf>) -> Self {
        Self { content_subdir }
    }
}

impl RepositoryLocator for Git2Locator {
    fn locate(&self, start: &Path) -> Result<RepositoryPaths> {
        let repo = Repository::discover(start).map_err(|e| {
            log::debug!("No repository found from {}: {e}", start.display());
            ProviderError::NotInGitRepo
        })?;

        let workdir = repo.workdir().ok_or_else(|| ProviderError::BareRepository {
            path: repo.path().to_path_buf(),
        })?;
        let root = std::fs::canonicalize(workdir)?;

        let content_dir = match &self.content_subdir {
            Some(subdir) => root.join(subdir),
            None => root.clone(),
        };

        log::debug!(
            "Repository root: {}, content directory: {}",
            root.display(),
            content_dir.display()
        );
        Ok(RepositoryPaths { root, content_dir })
    }
}

/// Serves paths decided up front, whatever the starting directory
#[derive(Debug, Clone)]
pub struct FixedLocator {
    paths: RepositoryPaths,
}

impl FixedLocator {
    pub fn new(paths: RepositoryPaths) -> Self {
        Self { paths }
    }
}

impl RepositoryLocator for FixedLocator {
    fn locate(&self, _start: &Path) -> Result<RepositoryPaths> {
        Ok(self.paths.clone())
    }
}
