//! Type-safe source control status enumeration.
//!
//! This module defines [`FileStatus`], the status a single file can have from the
//! provider's point of view, and the conversion from `git status --porcelain`
//! two-letter codes.
//!
//! # Public API
//! - [`FileStatus`]: Main enumeration for all file status types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Source control status of one file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FileStatus {
    /// No information yet
    #[default]
    Unknown,
    /// Tracked and identical to HEAD
    Unmodified,
    /// Added to the index (A)
    Added,
    /// Modified in the index or working tree (M)
    Modified,
    /// Deleted from the index or working tree (D)
    Deleted,
    /// Renamed or copied (R)
    Renamed,
    /// Unmerged/conflicted (UU)
    Conflicted,
    /// Not tracked by git (??)
    NotControlled,
    /// Ignored by a gitignore rule (!!)
    Ignored,
}

impl FileStatus {
    /// Convert the two status columns of a porcelain v1 line into a status.
    ///
    /// `x` is the index column and `y` the working tree column. Conflicts are
    /// checked first since they use letters that otherwise mean add or delete.
    pub fn from_porcelain(x: char, y: char) -> FileStatus {
        match (x, y) {
            ('?', '?') => FileStatus::NotControlled,
            ('!', '!') => FileStatus::Ignored,
            ('D', 'D') | ('A', 'A') | ('U', _) | (_, 'U') => FileStatus::Conflicted,
            // ' A' is an intent-to-add entry (`git add -N`)
            ('A', _) | (_, 'A') => FileStatus::Added,
            ('D', _) | (_, 'D') => FileStatus::Deleted,
            ('R', _) | ('C', _) => FileStatus::Renamed,
            ('M', _) | (_, 'M') | ('T', _) | (_, 'T') => FileStatus::Modified,
            _ => FileStatus::Unknown,
        }
    }

    /// Short code used in listings
    pub fn as_str(&self) -> &'static str {
        match self {
            FileStatus::Unknown => "-",
            FileStatus::Unmodified => " ",
            FileStatus::Added => "A",
            FileStatus::Modified => "M",
            FileStatus::Deleted => "D",
            FileStatus::Renamed => "R",
            FileStatus::Conflicted => "UU",
            FileStatus::NotControlled => "??",
            FileStatus::Ignored => "!!",
        }
    }

    /// Get human-readable description for status
    pub fn description(&self) -> &'static str {
        match self {
            FileStatus::Unknown => "unknown",
            FileStatus::Unmodified => "unchanged",
            FileStatus::Added => "added",
            FileStatus::Modified => "modified",
            FileStatus::Deleted => "deleted",
            FileStatus::Renamed => "renamed",
            FileStatus::Conflicted => "contents conflict",
            FileStatus::NotControlled => "not under source control",
            FileStatus::Ignored => "ignored",
        }
    }

    /// Whether git tracks this file
    pub fn is_source_controlled(&self) -> bool {
        !matches!(
            self,
            FileStatus::Unknown | FileStatus::NotControlled | FileStatus::Ignored
        )
    }

    /// Whether the file carries local changes that can be committed
    pub fn has_local_changes(&self) -> bool {
        matches!(
            self,
            FileStatus::Added | FileStatus::Modified | FileStatus::Deleted | FileStatus::Renamed
        )
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
