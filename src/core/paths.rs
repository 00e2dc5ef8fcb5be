//! Path normalization for cache keys and git arguments.

use std::path::{Component, Path, PathBuf};

/// Make `path` absolute against `base` and fold `.` and `..` components.
///
/// This is purely lexical: symlinks are not resolved and the file does not need
/// to exist, so the same input always yields the same cache key.
pub fn normalize_path(base: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component.as_os_str());
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Path as git expects it on the command line: relative to the repository root
/// when the file lives inside it, unchanged otherwise.
pub fn relative_to_root(root: &Path, path: &Path) -> PathBuf {
    match path.strip_prefix(root) {
        Ok(relative) if relative.as_os_str().is_empty() => PathBuf::from("."),
        Ok(relative) => relative.to_path_buf(),
        Err(_) => path.to_path_buf(),
    }
}
