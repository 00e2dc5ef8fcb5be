use crate::core::{
    command::CommandContext, error::Result, operation::MARK_FOR_ADD, worker::Worker,
};
use crate::workers::status::refresh_status;

/// Stages the requested files with `git add`
pub struct MarkForAddWorker;

impl Worker for MarkForAddWorker {
    fn name(&self) -> &'static str {
        MARK_FOR_ADD
    }

    fn execute(&mut self, command: &mut CommandContext) -> Result<()> {
        if command.files().is_empty() {
            return Ok(());
        }

        command.run_git_on_files("add", &[], command.files())?;

        let states = refresh_status(command, command.files())?;
        command.states = states;
        Ok(())
    }

    fn supports_cancel(&self) -> bool {
        true
    }
}
