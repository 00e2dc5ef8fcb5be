//! Commands: one queued unit of work.
//!
//! A [`Command`] bundles the resolved worker with everything it needs to run
//! (the [`CommandContext`]), the requested [`Concurrency`], the optional
//! completion callback and the shared control block the queue uses to track
//! status and cancellation.
//!
//! # Lifecycle
//! `Pending -> Running -> Succeeded | Failed | Cancelled`, plus `Pending -> Cancelled`
//! when a cancellation arrives before the worker starts. Terminal states never change.

use crate::core::{
    error::{ProviderError, Result},
    operation::Operation,
    paths::relative_to_root,
    process::{ProcessRunner, RunOutput},
    repository::RepositoryPaths,
    state::FileState,
    worker::Worker,
};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// Invoked once with the terminal result, always from reconciliation
pub type CompletionCallback = Box<dyn FnOnce(&CommandResult) + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandId(u64);

impl CommandId {
    pub(crate) fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Concurrency {
    /// Run inline; the caller blocks until the cache is reconciled
    #[default]
    Synchronous,
    /// Run on a worker thread; reconciled by a later `tick`
    Asynchronous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Pending,
    Running,
    Succeeded,
    Failed,
    Cancelled,
}

impl CommandStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CommandStatus::Succeeded | CommandStatus::Failed | CommandStatus::Cancelled
        )
    }
}

impl fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            CommandStatus::Pending => "pending",
            CommandStatus::Running => "running",
            CommandStatus::Succeeded => "succeeded",
            CommandStatus::Failed => "failed",
            CommandStatus::Cancelled => "cancelled",
        };
        write!(f, "{text}")
    }
}

/// Terminal outcome handed to callbacks and synchronous callers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub id: CommandId,
    pub operation: String,
    pub status: CommandStatus,
    pub info_messages: Vec<String>,
    pub error_messages: Vec<String>,
}

impl CommandResult {
    pub fn is_success(&self) -> bool {
        self.status == CommandStatus::Succeeded
    }

    /// Turn a failed or cancelled result into the matching error
    pub fn into_result(self) -> Result<Self> {
        match self.status {
            CommandStatus::Failed => {
                let message = if self.error_messages.is_empty() {
                    "unknown error".to_string()
                } else {
                    self.error_messages.join("\n")
                };
                Err(ProviderError::execution_failed(self.operation, message))
            }
            CommandStatus::Cancelled => Err(ProviderError::cancelled(self.operation)),
            _ => Ok(self),
        }
    }
}

/// What a cancellation request achieved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    /// The flag is set; the command ends as Cancelled once the worker notices
    CancelRequested,
    /// Nothing to cancel; the command already reached a terminal state
    AlreadyCompleted,
    /// The worker does not poll for cancellation; the command runs to completion
    NotCancellable,
    /// No command with this id was ever issued
    UnknownCommand,
}

#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Inputs of one command plus the result buffer its worker fills.
///
/// The buffer is private to the command until reconciliation copies it into the
/// state cache; workers never see the cache itself.
pub struct CommandContext {
    id: CommandId,
    operation: Operation,
    files: Vec<PathBuf>,
    paths: RepositoryPaths,
    runner: Arc<dyn ProcessRunner>,
    max_files_per_batch: usize,
    cancel: CancellationToken,
    pub states: Vec<FileState>,
    pub info_messages: Vec<String>,
    pub error_messages: Vec<String>,
}

impl CommandContext {
    pub fn new(
        id: CommandId,
        operation: Operation,
        files: Vec<PathBuf>,
        paths: RepositoryPaths,
        runner: Arc<dyn ProcessRunner>,
        max_files_per_batch: usize,
    ) -> Self {
        Self {
            id,
            operation,
            files,
            paths,
            runner,
            max_files_per_batch: max_files_per_batch.max(1),
            cancel: CancellationToken::new(),
            states: Vec::new(),
            info_messages: Vec::new(),
            error_messages: Vec::new(),
        }
    }

    pub fn id(&self) -> CommandId {
        self.id
    }

    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    /// Target files, absolute and normalized, in request order
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn repository_root(&self) -> &Path {
        &self.paths.root
    }

    pub fn content_dir(&self) -> &Path {
        &self.paths.content_dir
    }

    pub(crate) fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Cancellation checkpoint for workers
    pub fn check_cancelled(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(ProviderError::cancelled(self.operation.name()))
        } else {
            Ok(())
        }
    }

    /// Run a git command without file arguments, from the repository root
    pub fn run_git(&self, command: &str, args: &[&str]) -> Result<RunOutput> {
        let args: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();
        self.runner.run(&self.paths.root, command, &args)
    }

    /// Run a git command over `files`, batched, checking for cancellation before each batch.
    ///
    /// Files are passed after `--`, relative to the repository root. Returns the
    /// concatenated stdout of every batch; a failing batch stops the run.
    pub fn run_git_on_files(
        &self,
        command: &str,
        args: &[&str],
        files: &[PathBuf],
    ) -> Result<Vec<String>> {
        self.run_batches(command, args, files, true)
    }

    /// Same as [`run_git_on_files`](Self::run_git_on_files) but ignores cancellation.
    ///
    /// For queries that must still run once a worker has changed the repository.
    pub fn run_git_on_files_uninterrupted(
        &self,
        command: &str,
        args: &[&str],
        files: &[PathBuf],
    ) -> Result<Vec<String>> {
        self.run_batches(command, args, files, false)
    }

    fn run_batches(
        &self,
        command: &str,
        args: &[&str],
        files: &[PathBuf],
        cancellable: bool,
    ) -> Result<Vec<String>> {
        let mut stdout = Vec::new();

        for batch in files.chunks(self.max_files_per_batch) {
            if cancellable {
                self.check_cancelled()?;
            }

            let mut full_args: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();
            full_args.push("--".to_string());
            full_args.extend(
                batch
                    .iter()
                    .map(|file| relative_to_root(&self.paths.root, file))
                    .map(|file| file.to_string_lossy().into_owned()),
            );

            let output = self
                .runner
                .run(&self.paths.root, command, &full_args)?
                .into_checked(command)?;
            stdout.extend(output.stdout);
        }

        Ok(stdout)
    }
}

/// Status and cancellation state shared between the queue and a running command
pub(crate) struct CommandControl {
    status: Mutex<CommandStatus>,
    cancel: CancellationToken,
    cancellable: bool,
}

impl CommandControl {
    pub(crate) fn new(cancel: CancellationToken, cancellable: bool) -> Self {
        Self {
            status: Mutex::new(CommandStatus::Pending),
            cancel,
            cancellable,
        }
    }

    pub(crate) fn status(&self) -> CommandStatus {
        *self.lock()
    }

    /// Pending -> Running, unless a cancellation got there first
    pub(crate) fn start(&self) -> bool {
        let mut status = self.lock();
        if *status == CommandStatus::Pending {
            *status = CommandStatus::Running;
            true
        } else {
            false
        }
    }

    pub(crate) fn finish(&self, terminal: CommandStatus) -> CommandStatus {
        let mut status = self.lock();
        if !status.is_terminal() {
            *status = terminal;
        }
        *status
    }

    pub(crate) fn can_cancel(&self) -> bool {
        match self.status() {
            CommandStatus::Pending => true,
            CommandStatus::Running => self.cancellable,
            _ => false,
        }
    }

    pub(crate) fn request_cancel(&self) -> CancelOutcome {
        let mut status = self.lock();
        match *status {
            CommandStatus::Pending => {
                self.cancel.cancel();
                *status = CommandStatus::Cancelled;
                CancelOutcome::CancelRequested
            }
            CommandStatus::Running if self.cancellable => {
                self.cancel.cancel();
                CancelOutcome::CancelRequested
            }
            CommandStatus::Running => CancelOutcome::NotCancellable,
            _ => CancelOutcome::AlreadyCompleted,
        }
    }

    fn lock(&self) -> MutexGuard<'_, CommandStatus> {
        self.status
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

pub struct Command {
    pub(crate) context: CommandContext,
    pub(crate) worker: Box<dyn Worker>,
    pub(crate) concurrency: Concurrency,
    pub(crate) on_complete: Option<CompletionCallback>,
    pub(crate) control: Arc<CommandControl>,
}

impl Command {
    pub fn new(
        context: CommandContext,
        worker: Box<dyn Worker>,
        concurrency: Concurrency,
        on_complete: Option<CompletionCallback>,
    ) -> Self {
        let control = Arc::new(CommandControl::new(
            context.cancellation_token(),
            worker.supports_cancel(),
        ));
        Self {
            context,
            worker,
            concurrency,
            on_complete,
            control,
        }
    }

    pub fn id(&self) -> CommandId {
        self.context.id()
    }

    pub fn status(&self) -> CommandStatus {
        self.control.status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingRunner {
        calls: Mutex<Vec<(String, Vec<String>)>>,
    }

    impl ProcessRunner for RecordingRunner {
        fn run(&self, _working_dir: &Path, command: &str, args: &[String]) -> Result<RunOutput> {
            self.calls
                .lock()
                .unwrap()
                .push((command.to_string(), args.to_vec()));
            Ok(RunOutput::success(vec![format!("{} args", args.len())]))
        }
    }

    fn context(runner: Arc<RecordingRunner>, batch: usize) -> CommandContext {
        CommandContext::new(
            CommandId::new(1),
            Operation::mark_for_add(),
            Vec::new(),
            RepositoryPaths::at_root("/repo"),
            runner,
            batch,
        )
    }

    #[test]
    fn test_run_git_on_files_batches_relative_paths() -> Result<()> {
        let runner = Arc::new(RecordingRunner::default());
        let ctx = context(runner.clone(), 2);
        let files: Vec<PathBuf> = ["/repo/a", "/repo/b", "/repo/sub/c"]
            .iter()
            .map(PathBuf::from)
            .collect();

        let stdout = ctx.run_git_on_files("add", &[], &files)?;

        let calls = runner.calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].1, vec!["--", "a", "b"]);
        assert_eq!(calls[1].1, vec!["--", "sub/c"]);
        assert_eq!(stdout.len(), 2);
        Ok(())
    }

    #[test]
    fn test_cancelled_context_stops_before_running() {
        let runner = Arc::new(RecordingRunner::default());
        let ctx = context(runner.clone(), 50);
        ctx.cancellation_token().cancel();

        let result = ctx.run_git_on_files("add", &[], &[PathBuf::from("/repo/a")]);
        assert!(matches!(result, Err(ProviderError::Cancelled { .. })));
        assert!(runner.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_uninterrupted_run_ignores_cancellation() -> Result<()> {
        let runner = Arc::new(RecordingRunner::default());
        let ctx = context(runner.clone(), 1);
        ctx.cancellation_token().cancel();

        let files = [PathBuf::from("/repo/a"), PathBuf::from("/repo/b")];
        ctx.run_git_on_files_uninterrupted("status", &["--porcelain"], &files)?;

        assert_eq!(runner.calls.lock().unwrap().len(), 2);
        Ok(())
    }

    #[test]
    fn test_control_cancel_pending() {
        let control = CommandControl::new(CancellationToken::new(), false);
        assert!(control.can_cancel());
        assert_eq!(control.request_cancel(), CancelOutcome::CancelRequested);
        assert_eq!(control.status(), CommandStatus::Cancelled);
        assert!(!control.start());
        assert_eq!(control.request_cancel(), CancelOutcome::AlreadyCompleted);
    }

    #[test]
    fn test_control_running_not_cancellable() {
        let token = CancellationToken::new();
        let control = CommandControl::new(token.clone(), false);
        assert!(control.start());
        assert!(!control.can_cancel());
        assert_eq!(control.request_cancel(), CancelOutcome::NotCancellable);
        assert!(!token.is_cancelled());
        assert_eq!(control.finish(CommandStatus::Succeeded), CommandStatus::Succeeded);
    }

    #[test]
    fn test_control_terminal_is_final() {
        let control = CommandControl::new(CancellationToken::new(), true);
        assert!(control.start());
        assert_eq!(control.finish(CommandStatus::Failed), CommandStatus::Failed);
        assert_eq!(control.finish(CommandStatus::Succeeded), CommandStatus::Failed);
        assert_eq!(control.request_cancel(), CancelOutcome::AlreadyCompleted);
    }

    #[test]
    fn test_into_result_maps_failures() {
        let result = CommandResult {
            id: CommandId::new(3),
            operation: "CheckIn".to_string(),
            status: CommandStatus::Failed,
            info_messages: Vec::new(),
            error_messages: vec!["nothing to commit".to_string()],
        };
        let err = result.into_result().unwrap_err();
        assert_eq!(err.to_string(), "Operation 'CheckIn' failed: nothing to commit");
    }
}
