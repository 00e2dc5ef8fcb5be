//! Per-file source control state.
//!
//! [`FileState`] is the record stored in the [`StateCache`](crate::core::StateCache)
//! for one normalized path. Its path never changes after creation; the status and
//! timestamp are replaced whenever a command reports fresh information.

use crate::core::file_status::FileStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Two states are equal when path and status match; `last_updated` is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileState {
    path: PathBuf,
    pub status: FileStatus,
    pub last_updated: DateTime<Utc>,
}

impl FileState {
    pub fn new(path: impl Into<PathBuf>, status: FileStatus) -> Self {
        Self {
            path: path.into(),
            status,
            last_updated: Utc::now(),
        }
    }

    /// Placeholder for a path the provider knows nothing about yet
    pub fn unknown(path: impl Into<PathBuf>) -> Self {
        Self::new(path, FileStatus::Unknown)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn display_name(&self) -> &'static str {
        self.status.description()
    }

    pub fn is_source_controlled(&self) -> bool {
        self.status.is_source_controlled()
    }

    pub fn is_added(&self) -> bool {
        self.status == FileStatus::Added
    }

    pub fn is_deleted(&self) -> bool {
        self.status == FileStatus::Deleted
    }

    pub fn is_modified(&self) -> bool {
        self.status.has_local_changes()
    }

    pub fn is_conflicted(&self) -> bool {
        self.status == FileStatus::Conflicted
    }

    pub fn is_ignored(&self) -> bool {
        self.status == FileStatus::Ignored
    }

    /// Git has no exclusive lock, so a file counts as checked out once it is changed
    pub fn is_checked_out(&self) -> bool {
        self.status.has_local_changes()
    }

    /// Remote heads are not tracked; the local copy is always considered current
    pub fn is_current(&self) -> bool {
        true
    }

    pub fn can_check_in(&self) -> bool {
        self.status.has_local_changes()
    }

    pub fn can_revert(&self) -> bool {
        self.status.has_local_changes() || self.is_conflicted()
    }

    pub fn can_add(&self) -> bool {
        self.status == FileStatus::NotControlled
    }

    pub fn can_delete(&self) -> bool {
        self.is_source_controlled() && !self.is_deleted()
    }
}

impl PartialEq for FileState {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path && self.status == other.status
    }
}

impl Eq for FileState {}
