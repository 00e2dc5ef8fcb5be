//! Git Provider - a git source control provider with an operation-based API.
//!
//! Callers request operations by name (`UpdateStatus`, `CheckIn`, `Revert`, ...)
//! over sets of files. A registry maps each name to a worker that drives the git
//! command-line tool; a queue runs commands inline or on worker threads and
//! reconciles their results into a shared per-file state cache.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module:
//! - [`Provider`]: lifecycle, state queries, operation dispatch and `tick`
//! - [`FileState`] / [`FileStatus`]: cached per-file source control state
//! - [`Worker`] / [`WorkerRegistry`]: pluggable executors per operation
//! - [`ProcessRunner`]: seam for running git, replaceable in tests
//!
//! The git workers themselves live in [`workers`]; the CLI subcommands in
//! [`commands`].

pub mod commands;
pub mod core;
pub mod workers;

// Re-export the core public API for external users
pub use core::{
    // Commands and their results
    CancelOutcome,
    CommandId,
    CommandResult,
    CommandStatus,
    CompletionCallback,
    Concurrency,
    ExecuteOutcome,
    Operation,

    // File states
    FileState,
    FileStatus,
    HandlerId,
    StateCache,

    // Git access
    FixedLocator,
    GitCli,
    ProcessRunner,
    RepositoryLocator,
    RepositoryPaths,
    RunOutput,

    // Provider façade
    Provider,
    ProviderBuilder,
    ProviderSettings,
    StateCacheUsage,

    // Error handling
    ProviderError,
    Result,

    // Workers
    CommandContext,
    Worker,
    WorkerRegistry,
};
