use crate::core::{command::CommandContext, error::Result, operation::DELETE, worker::Worker};
use crate::workers::status::refresh_status;

/// Removes the requested files from the work tree and the index with `git rm`
pub struct DeleteWorker;

impl Worker for DeleteWorker {
    fn name(&self) -> &'static str {
        DELETE
    }

    fn execute(&mut self, command: &mut CommandContext) -> Result<()> {
        if command.files().is_empty() {
            return Ok(());
        }

        command.run_git_on_files("rm", &["-q"], command.files())?;

        let states = refresh_status(command, command.files())?;
        command.states = states;
        Ok(())
    }

    fn supports_cancel(&self) -> bool {
        true
    }
}
