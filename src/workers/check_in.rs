use crate::core::{
    command::CommandContext,
    error::{ProviderError, Result},
    operation::CHECK_IN,
    paths::relative_to_root,
    worker::Worker,
};
use crate::workers::status::refresh_status;

/// Commits the requested files (everything staged when none are given) with the
/// operation's description as the message
pub struct CheckInWorker;

impl Worker for CheckInWorker {
    fn name(&self) -> &'static str {
        CHECK_IN
    }

    fn execute(&mut self, command: &mut CommandContext) -> Result<()> {
        let message = command
            .operation()
            .description()
            .map(str::trim)
            .filter(|description| !description.is_empty())
            .ok_or_else(|| ProviderError::execution_failed(CHECK_IN, "a commit message is required"))?
            .to_string();

        // One commit for the whole request, so no batching here
        let mut args = vec!["--message".to_string(), message];
        if !command.files().is_empty() {
            args.push("--".to_string());
            args.extend(command.files().iter().map(|file| {
                relative_to_root(command.repository_root(), file)
                    .to_string_lossy()
                    .into_owned()
            }));
        }
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        let output = command.run_git("commit", &args)?.into_checked("commit")?;
        if let Some(summary) = output.stdout.into_iter().next() {
            log::info!("Committed: {summary}");
            command.info_messages.push(summary);
        }

        let states = refresh_status(command, command.files())?;
        command.states = states;
        Ok(())
    }
}
