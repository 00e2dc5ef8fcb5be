use crate::core::error::{ProviderError, Result};
use std::path::PathBuf;

pub const APP_DIR_NAME: &str = "git-provider";

pub fn get_config_directory() -> Result<PathBuf> {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config"))),
        "macos" => dirs::home_dir().map(|home| home.join("Library/Application Support")),
        _ => dirs::config_dir(),
    };

    base.map(|dir| dir.join(APP_DIR_NAME))
        .ok_or(ProviderError::ConfigDirectoryNotFound)
}
