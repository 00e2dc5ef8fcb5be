use crate::core::{
    command::CommandContext, error::Result, operation::UPDATE_STATUS, worker::Worker,
};
use crate::workers::status::collect_status;

/// Refreshes the state of the requested files, or of every changed file when none are given
pub struct UpdateStatusWorker;

impl Worker for UpdateStatusWorker {
    fn name(&self) -> &'static str {
        UPDATE_STATUS
    }

    fn execute(&mut self, command: &mut CommandContext) -> Result<()> {
        let states = collect_status(command, command.files())?;
        command.states = states;
        Ok(())
    }

    fn supports_cancel(&self) -> bool {
        true
    }
}
