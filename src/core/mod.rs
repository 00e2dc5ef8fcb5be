//! Core functionality for the git source control provider.
//!
//! This module provides the fundamental building blocks: file states and their
//! cache, commands and the queue that runs them, the worker registry, git process
//! execution, configuration, error handling and CLI presentation helpers.

pub mod colors;
pub mod command;
pub mod config;
pub mod dirs;
pub mod error;
pub mod file_status;
pub mod operation;
pub mod output;
pub mod paths;
pub mod process;
pub mod provider;
pub mod queue;
pub mod repository;
pub mod signal;
pub mod state;
pub mod state_cache;
pub mod worker;

// === Error handling ===
// Core error types and result type used throughout the crate
pub use error::{ProviderError, Result};

// === Provider façade ===
// Operation-based entry point owning the cache, registry and queue
pub use provider::{Provider, ProviderBuilder, StateCacheUsage, PROVIDER_NAME};

// === File states ===
// Status enumeration, per-file snapshot and the shared cache
pub use file_status::FileStatus;
pub use state::FileState;
pub use state_cache::StateCache;
pub use signal::HandlerId;

// === Commands ===
// Operation requests, queued commands and their results
pub use command::{
    CancelOutcome, Command, CommandContext, CommandId, CommandResult, CommandStatus,
    CompletionCallback, Concurrency,
};
pub use operation::Operation;
pub use queue::{CommandQueue, ExecuteOutcome};

// === Workers ===
// Executor interface and the operation-name registry
pub use worker::{Worker, WorkerFactory, WorkerRegistry};

// === Git access ===
// Process execution and repository discovery seams
pub use process::{GitCli, ProcessRunner, RunOutput};
pub use repository::{FixedLocator, Git2Locator, RepositoryLocator, RepositoryPaths};

// === Configuration ===
pub use config::ProviderSettings;

// === Output formatting ===
// Unified output formatting for consistent CLI presentation
pub use colors::{format_file_state, get_status_color_style};
pub use output::{
    print_command_messages, print_error, print_info, print_section_header, print_success,
};
