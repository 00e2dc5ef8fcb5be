//! CLI subcommands driving the provider.

pub mod connect;
pub mod operations;
pub mod run;
pub mod status;

pub use connect::*;
pub use operations::*;
pub use run::*;
pub use status::*;

use crate::core::{config::ProviderSettings, error::Result, provider::Provider};
use std::path::PathBuf;

/// Load the user's settings, apply the CLI override and connect to the
/// repository containing the current directory
pub fn open_provider(git_binary: Option<PathBuf>) -> Result<Provider> {
    let mut settings = ProviderSettings::load()?;
    if let Some(binary) = git_binary {
        settings.binary_path = binary;
    }

    let provider = Provider::new(settings);
    provider.init(true)?;
    Ok(provider)
}
