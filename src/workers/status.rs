//! `git status --porcelain` parsing shared by every worker that refreshes states.

use crate::core::{
    command::CommandContext, error::Result, file_status::FileStatus, paths::normalize_path,
    state::FileState,
};
use std::path::{Path, PathBuf};

const STATUS_ARGS: [&str; 3] = ["--porcelain", "--untracked-files=all", "--ignored"];

/// Query git for the status of `files` (the whole repository when empty).
///
/// Requested files git stays silent about are clean: Unmodified when they exist
/// on disk, NotControlled otherwise. Requested directories are never filled in;
/// their contents come from git's own report.
pub fn collect_status(command: &CommandContext, files: &[PathBuf]) -> Result<Vec<FileState>> {
    query_status(command, files, true)
}

/// [`collect_status`] for workers that already changed the repository.
///
/// Ignores cancellation so the cache always learns what the change did.
pub fn refresh_status(command: &CommandContext, files: &[PathBuf]) -> Result<Vec<FileState>> {
    query_status(command, files, false)
}

fn query_status(
    command: &CommandContext,
    files: &[PathBuf],
    cancellable: bool,
) -> Result<Vec<FileState>> {
    let root = command.repository_root();

    let stdout = if files.is_empty() {
        if cancellable {
            command.check_cancelled()?;
        }
        command
            .run_git("status", &STATUS_ARGS)?
            .into_checked("status")?
            .stdout
    } else if cancellable {
        command.run_git_on_files("status", &STATUS_ARGS, files)?
    } else {
        command.run_git_on_files_uninterrupted("status", &STATUS_ARGS, files)?
    };

    let mut states = parse_porcelain(root, &stdout);

    for file in files {
        if file.is_dir() || states.iter().any(|state| state.path() == file.as_path()) {
            continue;
        }
        let status = if file.exists() {
            FileStatus::Unmodified
        } else {
            FileStatus::NotControlled
        };
        states.push(FileState::new(file.clone(), status));
    }

    log::debug!(
        "{} {}: {} state(s) from git status",
        command.operation(),
        command.id(),
        states.len()
    );
    Ok(states)
}

/// Parse porcelain v1 lines into states with absolute paths under `root`.
///
/// A rename yields the source as Deleted and the destination with the entry's
/// status; a copy yields only the destination.
/// Lines that do not look like status entries are skipped.
pub fn parse_porcelain(root: &Path, lines: &[String]) -> Vec<FileState> {
    let mut states = Vec::new();

    for line in lines {
        let mut chars = line.chars();
        let (Some(x), Some(y), Some(' ')) = (chars.next(), chars.next(), chars.next()) else {
            if !line.trim().is_empty() {
                log::debug!("Skipping unexpected status line: {line}");
            }
            continue;
        };
        let entry = chars.as_str();
        let status = FileStatus::from_porcelain(x, y);

        // Renames and copies carry `source -> destination` whatever the work tree column says
        let source_and_destination = match x {
            'R' | 'C' => entry.split_once(" -> "),
            _ => None,
        };

        match source_and_destination {
            Some((from, to)) => {
                if x == 'R' {
                    states.push(FileState::new(
                        normalize_path(root, Path::new(&unquote(from))),
                        FileStatus::Deleted,
                    ));
                }
                states.push(FileState::new(
                    normalize_path(root, Path::new(&unquote(to))),
                    status,
                ));
            }
            None => states.push(FileState::new(
                normalize_path(root, Path::new(&unquote(entry))),
                status,
            )),
        }
    }

    states
}

/// Strip the C-style quoting git applies to unusual paths
fn unquote(path: &str) -> String {
    let Some(inner) = path
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    else {
        return path.to_string();
    };

    let mut unquoted = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            unquoted.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => unquoted.push('\n'),
            Some('t') => unquoted.push('\t'),
            Some(other) => unquoted.push(other),
            None => unquoted.push('\\'),
        }
    }
    unquoted
}
