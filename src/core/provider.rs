//! The source control provider façade.
//!
//! [`Provider`] is the only type callers need: it owns the state cache, the
//! worker registry and the command queue, and exposes the operation-based API
//! on top of them.
//!
//! # Public API
//! - [`Provider::init`] / [`Provider::close`]: readiness lifecycle
//! - [`Provider::get_state`]: cached or freshly queried file states
//! - [`Provider::execute`]: resolve a worker and submit a command
//! - [`Provider::tick`]: reconcile finished asynchronous commands
//! - [`Provider::register_state_changed`]: change notifications
//!
//! # Example
//! ```no_run
//! use git_provider::{Concurrency, Operation, Provider, StateCacheUsage};
//!
//! let provider = Provider::builder().build();
//! provider.init(true)?;
//! provider.execute(Operation::mark_for_add(), &["src/new.rs"], Concurrency::Synchronous, None)?;
//! let states = provider.get_state(&["src/new.rs"], StateCacheUsage::UseCache)?;
//! println!("{}", states[0].status.description());
//! # Ok::<(), git_provider::ProviderError>(())
//! ```

use crate::core::{
    command::{CancelOutcome, Command, CommandContext, CommandId, CommandStatus, CompletionCallback, Concurrency},
    config::ProviderSettings,
    error::{ProviderError, Result},
    operation::{Operation, UPDATE_STATUS},
    paths::normalize_path,
    process::{GitCli, ProcessRunner},
    queue::{CommandQueue, ExecuteOutcome},
    repository::{Git2Locator, RepositoryLocator, RepositoryPaths},
    signal::HandlerId,
    state::FileState,
    state_cache::StateCache,
    worker::{Worker, WorkerRegistry},
};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

pub const PROVIDER_NAME: &str = "Git";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateCacheUsage {
    /// Answer from the cache only; no git invocation
    UseCache,
    /// Run a synchronous status query first
    ForceUpdate,
}

pub struct ProviderBuilder {
    settings: ProviderSettings,
    runner: Option<Arc<dyn ProcessRunner>>,
    locator: Option<Box<dyn RepositoryLocator>>,
    start_dir: Option<PathBuf>,
    registry: Option<WorkerRegistry>,
}

impl ProviderBuilder {
    fn new() -> Self {
        Self {
            settings: ProviderSettings::default(),
            runner: None,
            locator: None,
            start_dir: None,
            registry: None,
        }
    }

    pub fn settings(mut self, settings: ProviderSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Replace the git process runner
    pub fn runner(mut self, runner: Arc<dyn ProcessRunner>) -> Self {
        self.runner = Some(runner);
        self
    }

    /// Replace repository discovery
    pub fn locator(mut self, locator: impl RepositoryLocator + 'static) -> Self {
        self.locator = Some(Box::new(locator));
        self
    }

    /// Directory repository discovery starts from; the current directory by default
    pub fn start_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.start_dir = Some(dir.into());
        self
    }

    /// Start from this registry instead of the default git workers
    pub fn registry(mut self, registry: WorkerRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn build(self) -> Provider {
        let runner = self
            .runner
            .unwrap_or_else(|| Arc::new(GitCli::new(self.settings.binary_path.clone())));
        let locator = self
            .locator
            .unwrap_or_else(|| Box::new(Git2Locator::new(self.settings.content_subdir.clone())));
        let cache = Arc::new(StateCache::new());

        Provider {
            runner,
            locator,
            start_dir: self.start_dir,
            paths: RwLock::new(None),
            registry: RwLock::new(self.registry.unwrap_or_else(WorkerRegistry::with_default_workers)),
            queue: CommandQueue::new(cache.clone()),
            cache,
            settings: self.settings,
        }
    }
}

pub struct Provider {
    settings: ProviderSettings,
    runner: Arc<dyn ProcessRunner>,
    locator: Box<dyn RepositoryLocator>,
    start_dir: Option<PathBuf>,
    /// `Some` once init succeeded
    paths: RwLock<Option<RepositoryPaths>>,
    registry: RwLock<WorkerRegistry>,
    cache: Arc<StateCache>,
    queue: CommandQueue,
}

impl Provider {
    pub fn builder() -> ProviderBuilder {
        ProviderBuilder::new()
    }

    pub fn new(settings: ProviderSettings) -> Self {
        Self::builder().settings(settings).build()
    }

    /// Locate the repository and, with `force_connection`, check that git answers.
    ///
    /// Does nothing when the provider is already initialized.
    pub fn init(&self, force_connection: bool) -> Result<()> {
        if self.is_enabled() {
            return Ok(());
        }

        let start = match &self.start_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };
        let paths = self.locator.locate(&start)?;

        if force_connection {
            let output = self
                .runner
                .run(&paths.root, "version", &[])?
                .into_checked("version")?;
            log::info!(
                "Using {}",
                output.stdout.first().map(String::as_str).unwrap_or("git")
            );
        }

        log::info!(
            "Source control ready at {} (content: {})",
            paths.root.display(),
            paths.content_dir.display()
        );
        *self.write_paths() = Some(paths);
        Ok(())
    }

    /// Drop readiness and ask pending asynchronous commands to stop.
    ///
    /// Commands already running finish on their own and are still reconciled by `tick`.
    pub fn close(&self) {
        let was_ready = self.write_paths().take().is_some();
        let cancelled = self.queue.cancel_all();
        if was_ready {
            log::info!("Source control closed ({cancelled} pending command(s) asked to cancel)");
        }
    }

    pub fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    pub fn is_enabled(&self) -> bool {
        self.read_paths().is_some()
    }

    pub fn is_available(&self) -> bool {
        self.is_enabled()
    }

    /// Git never marks files read-only
    pub fn uses_local_read_only_state(&self) -> bool {
        false
    }

    pub fn status_text(&self) -> String {
        match self.read_paths().as_ref() {
            Some(paths) => format!(
                "Enabled\nRepository: {}\nContent: {}",
                paths.root.display(),
                paths.content_dir.display()
            ),
            None => "Not connected".to_string(),
        }
    }

    pub fn settings(&self) -> &ProviderSettings {
        &self.settings
    }

    pub fn repository_root(&self) -> Option<PathBuf> {
        self.read_paths().as_ref().map(|paths| paths.root.clone())
    }

    pub fn content_dir(&self) -> Option<PathBuf> {
        self.read_paths().as_ref().map(|paths| paths.content_dir.clone())
    }

    /// Shared handle to the state cache
    pub fn cache(&self) -> Arc<StateCache> {
        self.cache.clone()
    }

    /// States for `files`, in input order.
    ///
    /// Relative paths are taken from the repository root. With
    /// [`StateCacheUsage::ForceUpdate`] a synchronous `UpdateStatus` runs first
    /// and its failure is returned as the error.
    pub fn get_state<P: AsRef<Path>>(
        &self,
        files: &[P],
        usage: StateCacheUsage,
    ) -> Result<Vec<FileState>> {
        let paths = self.ready_paths()?;
        let normalized: Vec<PathBuf> = files
            .iter()
            .map(|file| normalize_path(&paths.root, file.as_ref()))
            .collect();

        if usage == StateCacheUsage::ForceUpdate {
            self.execute(
                Operation::new(UPDATE_STATUS),
                &normalized,
                Concurrency::Synchronous,
                None,
            )?
            .completed()
            .ok_or_else(|| ProviderError::execution_failed(UPDATE_STATUS, "status query was not run inline"))?
            .into_result()?;
        }

        Ok(normalized
            .iter()
            .map(|path| self.cache.get_or_create(path))
            .collect())
    }

    /// Resolve a worker for `operation` and submit it over `files`.
    ///
    /// Unsupported operations and an uninitialized provider are reported as
    /// errors before anything is queued. Execution failures are not errors
    /// here: they arrive as the command's terminal status.
    pub fn execute<P: AsRef<Path>>(
        &self,
        operation: Operation,
        files: &[P],
        concurrency: Concurrency,
        on_complete: Option<CompletionCallback>,
    ) -> Result<ExecuteOutcome> {
        let paths = self.ready_paths()?;

        let worker = self.resolve_worker(operation.name())?;

        let mut targets: Vec<PathBuf> = Vec::with_capacity(files.len());
        for file in files {
            let path = normalize_path(&paths.root, file.as_ref());
            if !targets.contains(&path) {
                targets.push(path);
            }
        }

        let context = CommandContext::new(
            self.queue.allocate_id(),
            operation,
            targets,
            paths,
            self.runner.clone(),
            self.settings.max_files_per_batch,
        );
        let command = Command::new(context, worker, concurrency, on_complete);
        Ok(self.queue.submit(command))
    }

    /// Reconcile finished asynchronous commands; call this regularly from the main loop
    pub fn tick(&self) -> usize {
        self.queue.tick()
    }

    pub fn can_cancel_operation(&self, id: CommandId) -> bool {
        self.queue.can_cancel(id)
    }

    pub fn cancel_operation(&self, id: CommandId) -> CancelOutcome {
        self.queue.cancel(id)
    }

    /// Status of a command not yet reconciled; `None` once it is
    pub fn command_status(&self, id: CommandId) -> Option<CommandStatus> {
        self.queue.status(id)
    }

    pub fn pending_commands(&self) -> usize {
        self.queue.pending_count()
    }

    /// Add or replace the worker behind `operation`
    pub fn register_worker<F>(&self, operation: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn Worker> + Send + Sync + 'static,
    {
        self.registry
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .register(operation, factory);
    }

    pub fn supported_operations(&self) -> Vec<String> {
        self.read_registry().operation_names()
    }

    pub fn register_state_changed<F>(&self, handler: F) -> HandlerId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.cache.register_state_changed(handler)
    }

    pub fn unregister_state_changed(&self, id: HandlerId) -> bool {
        self.cache.unregister_state_changed(id)
    }

    fn resolve_worker(&self, operation: &str) -> Result<Box<dyn Worker>> {
        self.read_registry().resolve(operation).ok_or_else(|| {
            log::debug!("No worker registered for '{operation}'");
            ProviderError::operation_not_supported(operation)
        })
    }

    fn ready_paths(&self) -> Result<RepositoryPaths> {
        self.read_paths().clone().ok_or(ProviderError::NotReady)
    }

    fn read_registry(&self) -> RwLockReadGuard<'_, WorkerRegistry> {
        self.registry
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn read_paths(&self) -> RwLockReadGuard<'_, Option<RepositoryPaths>> {
        self.paths
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_paths(&self) -> RwLockWriteGuard<'_, Option<RepositoryPaths>> {
        self.paths
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for Provider {
    fn drop(&mut self) {
        self.close();
    }
}
