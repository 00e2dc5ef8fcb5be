use crate::core::{
    command::CommandContext,
    error::{ProviderError, Result},
    operation::CONNECT,
    worker::Worker,
};

/// Checks that the repository root is a git work tree and reports the git version
pub struct ConnectWorker;

impl Worker for ConnectWorker {
    fn name(&self) -> &'static str {
        CONNECT
    }

    fn execute(&mut self, command: &mut CommandContext) -> Result<()> {
        let output = command
            .run_git("rev-parse", &["--is-inside-work-tree"])?
            .into_checked("rev-parse")?;

        if output.stdout.first().map(|line| line.trim()) != Some("true") {
            return Err(ProviderError::execution_failed(
                CONNECT,
                format!(
                    "{} is not inside a git work tree",
                    command.repository_root().display()
                ),
            ));
        }

        let version = command.run_git("version", &[])?.into_checked("version")?;
        if let Some(line) = version.stdout.into_iter().next() {
            command.info_messages.push(line);
        }
        Ok(())
    }
}
