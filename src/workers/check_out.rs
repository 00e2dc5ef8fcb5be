use crate::core::{command::CommandContext, error::Result, operation::CHECK_OUT, worker::Worker};
use crate::workers::status::collect_status;

/// Git has no exclusive checkout; checking out a file only refreshes its state
pub struct CheckOutWorker;

impl Worker for CheckOutWorker {
    fn name(&self) -> &'static str {
        CHECK_OUT
    }

    fn execute(&mut self, command: &mut CommandContext) -> Result<()> {
        if command.files().is_empty() {
            return Ok(());
        }
        let states = collect_status(command, command.files())?;
        command.states = states;
        Ok(())
    }
}
