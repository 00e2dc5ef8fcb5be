use crate::commands::run::run_to_completion;
use crate::core::{
    command::Concurrency,
    error::Result,
    operation::Operation,
    output::{print_command_messages, print_success},
    provider::Provider,
};

pub fn execute_connect(provider: &Provider, concurrency: Concurrency) -> Result<()> {
    let result = run_to_completion(provider, Operation::connect(), &[], concurrency)?.into_result()?;

    print_success(&provider.status_text());
    print_command_messages(&result);
    Ok(())
}
