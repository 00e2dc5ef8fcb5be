use crate::commands::run::run_to_completion;
use crate::core::{
    colors::format_file_state,
    command::Concurrency,
    error::Result,
    file_status::FileStatus,
    operation::Operation,
    output::{print_info, print_section_header},
    provider::{Provider, StateCacheUsage},
    state::FileState,
};
use std::path::PathBuf;

/// Refresh and print the state of `paths`, or of every changed file when empty
pub fn execute_status(provider: &Provider, paths: &[PathBuf], concurrency: Concurrency) -> Result<()> {
    run_to_completion(provider, Operation::update_status(), paths, concurrency)?.into_result()?;

    let states: Vec<FileState> = if paths.is_empty() {
        provider
            .cache()
            .states_matching(|state| state.status != FileStatus::Unmodified)
    } else {
        provider.get_state(paths, StateCacheUsage::UseCache)?
    };

    if states.is_empty() {
        print_info("Nothing to report, working tree clean");
        return Ok(());
    }

    let root = provider.repository_root().unwrap_or_default();
    print_section_header("Files");
    for state in &states {
        println!("  {}", format_file_state(state, &root));
    }
    println!();
    Ok(())
}
