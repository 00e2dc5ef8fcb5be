//! Workers and the operation-to-worker registry.
//!
//! A [`Worker`] performs one operation kind against git and leaves fresh file
//! states in the command's result buffer. The [`WorkerRegistry`] maps operation
//! names to factories so new operations plug in without touching the dispatcher.
//! A fresh worker is built for every command.
//!
//! # Public API
//! - [`Worker`]: Executor interface implemented once per operation kind
//! - [`WorkerFactory`]: Shared constructor stored in the registry
//! - [`WorkerRegistry`]: Name to factory mapping

use crate::core::{command::CommandContext, error::Result};
use std::collections::HashMap;
use std::sync::Arc;

pub trait Worker: Send {
    /// Name used in logs
    fn name(&self) -> &'static str;

    /// Run the operation for `command`.
    ///
    /// Results go into `command.states` (and the message buffers). Returning
    /// `Err(ProviderError::Cancelled)` ends the command as Cancelled, any other
    /// error as Failed.
    fn execute(&mut self, command: &mut CommandContext) -> Result<()>;

    /// Whether `execute` polls [`CommandContext::check_cancelled`] while running
    fn supports_cancel(&self) -> bool {
        false
    }
}

pub type WorkerFactory = Arc<dyn Fn() -> Box<dyn Worker> + Send + Sync>;

#[derive(Default, Clone)]
pub struct WorkerRegistry {
    factories: HashMap<String, WorkerFactory>,
}

impl WorkerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the git workers
    pub fn with_default_workers() -> Self {
        let mut registry = Self::new();
        crate::workers::register_default_workers(&mut registry);
        registry
    }

    /// Register `factory` for `operation`, replacing any previous registration
    pub fn register<F>(&mut self, operation: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn Worker> + Send + Sync + 'static,
    {
        let operation = operation.into();
        if self
            .factories
            .insert(operation.clone(), Arc::new(factory))
            .is_some()
        {
            log::debug!("Replaced worker for operation '{operation}'");
        }
    }

    /// Build a worker for `operation`; `None` means the operation is not supported
    pub fn resolve(&self, operation: &str) -> Option<Box<dyn Worker>> {
        self.factories.get(operation).map(|factory| factory())
    }

    pub fn is_registered(&self, operation: &str) -> bool {
        self.factories.contains_key(operation)
    }

    /// Registered operation names, sorted
    pub fn operation_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}
