//! Output formatting for the `git-provider` CLI.
//!
//! Every command prints through these helpers so errors, confirmations and
//! command messages share one look.
//!
//! # Design Principles
//! - Red for errors, green for success, yellow for command warnings
//! - A blank line before each block

use crate::core::command::CommandResult;
use colored::*;

/// ```text
///
/// ✕ Error: <message>
///
/// ```
pub fn print_error(message: &str) {
    eprintln!("\n{} {}\n", "✕ Error:".red(), message.white());
}

/// ```text
///
/// ✓ <message>
/// ```
pub fn print_success(message: &str) {
    println!("\n{} {}", "✓".green(), message.white());
}

pub fn print_info(message: &str) {
    println!("\n{}\n", message.white());
}

/// ```text
///
/// <header>:
///
/// ```
pub fn print_section_header(header: &str) {
    println!("\n{}:\n", header.white());
}

/// Info lines in white, error lines in yellow, each indented under the command
pub fn print_command_messages(result: &CommandResult) {
    for message in &result.info_messages {
        println!("  {}", message.white());
    }
    for message in &result.error_messages {
        println!("  {} {}", "!".yellow(), message.yellow());
    }
}
