use crate::core::{
    command::CommandContext, error::Result, file_status::FileStatus, operation::REVERT,
    worker::Worker,
};
use crate::workers::status::{collect_status, refresh_status};
use std::path::PathBuf;

/// Discards local changes.
///
/// Files new to the index (added, or the destination of a rename) are unstaged
/// and left on disk. Files that exist in HEAD are restored from it.
pub struct RevertWorker;

impl Worker for RevertWorker {
    fn name(&self) -> &'static str {
        REVERT
    }

    fn execute(&mut self, command: &mut CommandContext) -> Result<()> {
        if command.files().is_empty() {
            return Ok(());
        }

        let current = collect_status(command, command.files())?;

        let mut unstage: Vec<PathBuf> = Vec::new();
        let mut restore: Vec<PathBuf> = Vec::new();
        for state in current {
            match state.status {
                FileStatus::Added | FileStatus::Renamed => unstage.push(state.path().to_path_buf()),
                FileStatus::Modified | FileStatus::Deleted | FileStatus::Conflicted => {
                    restore.push(state.path().to_path_buf())
                }
                _ => {}
            }
        }

        log::debug!(
            "Revert {}: {} to unstage, {} to restore",
            command.id(),
            unstage.len(),
            restore.len()
        );
        command.run_git_on_files("reset", &["-q"], &unstage)?;
        command.run_git_on_files("checkout", &["HEAD"], &restore)?;

        let states = refresh_status(command, command.files())?;
        command.states = states;
        Ok(())
    }
}
