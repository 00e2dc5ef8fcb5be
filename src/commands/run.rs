use crate::core::{
    colors::format_file_state,
    command::{CommandResult, Concurrency},
    error::Result,
    operation::Operation,
    output::{print_command_messages, print_section_header, print_success},
    provider::{Provider, StateCacheUsage},
};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

const TICK_INTERVAL: Duration = Duration::from_millis(20);

/// Execute `operation` and wait for its terminal result.
///
/// Asynchronous commands are driven by ticking the provider until the
/// completion callback fires, the way a host main loop would.
pub fn run_to_completion(
    provider: &Provider,
    operation: Operation,
    files: &[PathBuf],
    concurrency: Concurrency,
) -> Result<CommandResult> {
    let (sender, receiver) = mpsc::channel();
    let outcome = provider.execute(
        operation,
        files,
        concurrency,
        Some(Box::new(move |result: &CommandResult| {
            let _ = sender.send(result.clone());
        })),
    )?;

    if let Some(result) = outcome.completed() {
        return Ok(result);
    }

    loop {
        provider.tick();
        if let Ok(result) = receiver.try_recv() {
            return Ok(result);
        }
        thread::sleep(TICK_INTERVAL);
    }
}

/// Run a file operation from the CLI and list the resulting states
pub fn execute_operation(
    provider: &Provider,
    operation: Operation,
    files: &[PathBuf],
    concurrency: Concurrency,
) -> Result<()> {
    let name = operation.name().to_string();
    let result = run_to_completion(provider, operation, files, concurrency)?;
    print_command_messages(&result);
    let result = result.into_result()?;

    print_success(&format!("{name} {} completed for {} file(s)", result.id, files.len()));

    let states = provider.get_state(files, StateCacheUsage::UseCache)?;
    if states.is_empty() {
        return Ok(());
    }

    let root = provider.repository_root().unwrap_or_default();
    print_section_header("Files");
    for state in &states {
        println!("  {}", format_file_state(state, &root));
    }
    Ok(())
}
