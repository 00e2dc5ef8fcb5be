use clap::{Parser, Subcommand};
use git_provider::commands::*;
use git_provider::core::{
    command::Concurrency,
    error::{ProviderError, Result},
    operation::Operation,
    paths::normalize_path,
    print_error,
};
use std::env;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "git-provider")]
#[command(about = "Operation-based git source control provider")]
#[command(version = "0.1.0")]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Git executable to use instead of the configured one
    #[arg(long = "git", global = true, value_name = "PATH")]
    git_binary: Option<PathBuf>,

    /// Run the operation on a worker thread and tick until it completes
    #[arg(long = "async", global = true)]
    asynchronous: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the state of files (every changed file when none are given)
    Status { paths: Vec<PathBuf> },
    /// Mark files for add
    Add {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Delete files from the work tree and the index
    Delete {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Discard local changes to files
    Revert {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Check out files (refreshes their state)
    Checkout {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Commit files (everything staged when none are given)
    Commit {
        /// Commit message
        #[arg(short, long)]
        message: String,
        paths: Vec<PathBuf>,
    },
    /// Check the repository and the git executable
    Connect,
    /// List supported operations
    Operations,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configure logging based on --debug flag
    if cli.debug {
        env::set_var("RUST_LOG", "debug");
    } else {
        env::set_var("RUST_LOG", "warn");
    }
    env_logger::init();

    if let Err(e) = run(cli) {
        if let ProviderError::NotInGitRepo = e {
            print_error("Not in a git repository");
        } else {
            print_error(&e.to_string());
        }
        std::process::exit(1);
    }

    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let concurrency = if cli.asynchronous {
        Concurrency::Asynchronous
    } else {
        Concurrency::Synchronous
    };
    let provider = open_provider(cli.git_binary)?;

    // Paths on the command line are relative to where the user stands
    let current_dir = env::current_dir()?.canonicalize()?;
    let absolute = |paths: Vec<PathBuf>| -> Vec<PathBuf> {
        paths
            .iter()
            .map(|path| normalize_path(&current_dir, path))
            .collect()
    };

    match cli.command {
        Commands::Status { paths } => execute_status(&provider, &absolute(paths), concurrency),
        Commands::Add { paths } => {
            execute_operation(&provider, Operation::mark_for_add(), &absolute(paths), concurrency)
        }
        Commands::Delete { paths } => {
            execute_operation(&provider, Operation::delete(), &absolute(paths), concurrency)
        }
        Commands::Revert { paths } => {
            execute_operation(&provider, Operation::revert(), &absolute(paths), concurrency)
        }
        Commands::Checkout { paths } => {
            execute_operation(&provider, Operation::check_out(), &absolute(paths), concurrency)
        }
        Commands::Commit { message, paths } => execute_operation(
            &provider,
            Operation::check_in(message),
            &absolute(paths),
            concurrency,
        ),
        Commands::Connect => execute_connect(&provider, concurrency),
        Commands::Operations => {
            execute_list_operations(&provider);
            Ok(())
        }
    }
}
