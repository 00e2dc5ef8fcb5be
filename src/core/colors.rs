//! Color mapping for file states in CLI listings.
//!
//! One function decides the color of each [`FileStatus`]; everything that prints
//! a status goes through it so listings, legends and summaries stay consistent.
//!
//! # Color Scheme
//! - **Modified**: Yellow
//! - **Added**: Green
//! - **Deleted**: Red
//! - **Renamed**: Blue
//! - **Not controlled**: Cyan
//! - **Conflicted**: Red bold
//! - **Ignored / Unknown**: Bright black

use crate::core::{file_status::FileStatus, state::FileState};
use colored::*;
use std::path::Path;

/// Color function for `status`, applicable to any text
pub fn get_status_color_style(status: FileStatus) -> Box<dyn Fn(&str) -> ColoredString> {
    match status {
        FileStatus::Modified => Box::new(|text: &str| text.yellow()),
        FileStatus::Added => Box::new(|text: &str| text.green()),
        FileStatus::Deleted => Box::new(|text: &str| text.red()),
        FileStatus::Renamed => Box::new(|text: &str| text.blue()),
        FileStatus::NotControlled => Box::new(|text: &str| text.cyan()),
        FileStatus::Conflicted => Box::new(|text: &str| text.red().bold()),
        FileStatus::Unmodified => Box::new(|text: &str| text.normal()),
        FileStatus::Ignored | FileStatus::Unknown => Box::new(|text: &str| text.bright_black()),
    }
}

/// Status code padded to two columns
pub fn get_aligned_status(status: FileStatus) -> ColoredString {
    let color_fn = get_status_color_style(status);
    color_fn(&format!("{:<2}", status.as_str()))
}

/// One listing line: `<code> <path>  (<description>)`, path shown relative to `root`
pub fn format_file_state(state: &FileState, root: &Path) -> String {
    let color_fn = get_status_color_style(state.status);
    let path = state
        .path()
        .strip_prefix(root)
        .unwrap_or_else(|_| state.path());
    let path_text = path.display().to_string();

    format!(
        "{} {}  {}",
        get_aligned_status(state.status),
        color_fn(&path_text),
        format!("({})", state.status.description()).bright_black()
    )
}
