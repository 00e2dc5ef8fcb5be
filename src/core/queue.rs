//! Command queue and dispatcher.
//!
//! [`CommandQueue`] owns every submitted command until it is reconciled.
//! Synchronous commands run inline on the submitting thread and are reconciled
//! before [`CommandQueue::submit`] returns. Asynchronous commands each get a
//! worker thread; when the worker finishes it sends its result buffer over a
//! channel, and the next [`CommandQueue::tick`] applies it.
//!
//! # Reconciliation
//! Reconciliation is the only path that writes to the [`StateCache`] and the
//! only place completion callbacks run: apply the command's states with one
//! bulk update, invoke the callback with the terminal result, then drop the
//! command from the pending list. No queue lock is held while the cache is
//! updated or the callback runs, so callbacks may submit new commands.
//!
//! # Failures
//! A worker error or panic only marks its own command Failed; the queue keeps
//! processing everything else.

use crate::core::{
    command::{
        CancelOutcome, Command, CommandControl, CommandId, CommandResult, CommandStatus,
        CompletionCallback, Concurrency, CommandContext,
    },
    error::ProviderError,
    state::FileState,
    state_cache::StateCache,
    worker::Worker,
};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;

/// What [`CommandQueue::submit`] hands back
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecuteOutcome {
    /// Synchronous command, already reconciled
    Completed(CommandResult),
    /// Asynchronous command, reconciled by a later tick
    Queued(CommandId),
}

impl ExecuteOutcome {
    pub fn command_id(&self) -> CommandId {
        match self {
            ExecuteOutcome::Completed(result) => result.id,
            ExecuteOutcome::Queued(id) => *id,
        }
    }

    pub fn completed(self) -> Option<CommandResult> {
        match self {
            ExecuteOutcome::Completed(result) => Some(result),
            ExecuteOutcome::Queued(_) => None,
        }
    }
}

/// Result buffer of a finished command, handed from the worker to reconciliation
struct Completion {
    id: CommandId,
    operation: String,
    status: CommandStatus,
    states: Vec<FileState>,
    info_messages: Vec<String>,
    error_messages: Vec<String>,
}

struct PendingCommand {
    id: CommandId,
    operation: String,
    concurrency: Concurrency,
    control: Arc<CommandControl>,
    on_complete: Option<CompletionCallback>,
}

pub struct CommandQueue {
    cache: Arc<StateCache>,
    pending: Mutex<Vec<PendingCommand>>,
    sender: Mutex<Sender<Completion>>,
    receiver: Mutex<Receiver<Completion>>,
    next_id: AtomicU64,
}

impl CommandQueue {
    pub fn new(cache: Arc<StateCache>) -> Self {
        let (sender, receiver) = channel();
        Self {
            cache,
            pending: Mutex::new(Vec::new()),
            sender: Mutex::new(sender),
            receiver: Mutex::new(receiver),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn cache(&self) -> &Arc<StateCache> {
        &self.cache
    }

    pub fn allocate_id(&self) -> CommandId {
        CommandId::new(self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    pub fn submit(&self, command: Command) -> ExecuteOutcome {
        let Command {
            context,
            mut worker,
            concurrency,
            on_complete,
            control,
        } = command;
        let id = context.id();
        let operation = context.operation().name().to_string();

        log::debug!(
            "Submitting {operation} {id} ({concurrency:?}, {} file(s))",
            context.files().len()
        );
        self.lock_pending().push(PendingCommand {
            id,
            operation,
            concurrency,
            control: control.clone(),
            on_complete,
        });

        match concurrency {
            Concurrency::Synchronous => {
                let completion = run_worker(worker.as_mut(), context, &control);
                ExecuteOutcome::Completed(self.reconcile(completion))
            }
            Concurrency::Asynchronous => {
                self.spawn(worker, context, control);
                ExecuteOutcome::Queued(id)
            }
        }
    }

    /// Reconcile every asynchronous command whose worker has finished.
    ///
    /// Commands are reconciled in the order their workers finished. Returns how
    /// many were reconciled.
    pub fn tick(&self) -> usize {
        let completions: Vec<Completion> = self.lock_receiver().try_iter().collect();
        let count = completions.len();
        for completion in completions {
            self.reconcile(completion);
        }
        count
    }

    pub fn cancel(&self, id: CommandId) -> CancelOutcome {
        if id.value() == 0 || id.value() >= self.next_id.load(Ordering::SeqCst) {
            return CancelOutcome::UnknownCommand;
        }

        let entry = self
            .lock_pending()
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| (entry.operation.clone(), entry.control.clone()));

        match entry {
            Some((operation, control)) => {
                let outcome = control.request_cancel();
                log::debug!("Cancel request for {operation} {id}: {outcome:?}");
                outcome
            }
            None => {
                log::debug!("Cancel request for command {id}: already completed");
                CancelOutcome::AlreadyCompleted
            }
        }
    }

    /// Request cancellation of every command not yet finished; returns how many accepted
    pub fn cancel_all(&self) -> usize {
        let controls: Vec<Arc<CommandControl>> = self
            .lock_pending()
            .iter()
            .filter(|entry| entry.concurrency == Concurrency::Asynchronous)
            .map(|entry| entry.control.clone())
            .collect();

        controls
            .iter()
            .filter(|control| control.request_cancel() == CancelOutcome::CancelRequested)
            .count()
    }

    pub fn can_cancel(&self, id: CommandId) -> bool {
        self.control_of(id)
            .map(|control| control.can_cancel())
            .unwrap_or(false)
    }

    /// Status of a command still owned by the queue
    pub fn status(&self, id: CommandId) -> Option<CommandStatus> {
        self.control_of(id).map(|control| control.status())
    }

    pub fn pending_count(&self) -> usize {
        self.lock_pending().len()
    }

    fn spawn(&self, mut worker: Box<dyn Worker>, context: CommandContext, control: Arc<CommandControl>) {
        let id = context.id();
        let operation = context.operation().name().to_string();
        let sender = self.lock_sender().clone();
        let thread_control = control.clone();

        let spawned = thread::Builder::new()
            .name(format!("git-worker-{}", id.value()))
            .spawn(move || {
                let completion = run_worker(worker.as_mut(), context, &thread_control);
                if sender.send(completion).is_err() {
                    log::debug!("Command {id} finished after its queue was dropped");
                }
            });

        if let Err(e) = spawned {
            log::error!("Failed to start worker thread for {operation} {id}: {e}");
            let status = control.finish(CommandStatus::Failed);
            let completion = Completion {
                id,
                operation,
                status,
                states: Vec::new(),
                info_messages: Vec::new(),
                error_messages: vec![format!("failed to start worker thread: {e}")],
            };
            // The receiver lives as long as self, so this cannot fail
            let _ = self.lock_sender().send(completion);
        }
    }

    fn reconcile(&self, completion: Completion) -> CommandResult {
        let Completion {
            id,
            operation,
            status,
            states,
            info_messages,
            error_messages,
        } = completion;

        let on_complete = match self.lock_pending().iter_mut().find(|entry| entry.id == id) {
            Some(entry) => entry.on_complete.take(),
            None => {
                log::warn!("Reconciling command {id} that is no longer pending");
                None
            }
        };

        self.cache.bulk_update(states);

        let result = CommandResult {
            id,
            operation,
            status,
            info_messages,
            error_messages,
        };
        if let Some(callback) = on_complete {
            callback(&result);
        }

        self.lock_pending().retain(|entry| entry.id != id);

        match result.status {
            CommandStatus::Failed => log::warn!(
                "{} {} failed: {}",
                result.operation,
                id,
                result.error_messages.join("; ")
            ),
            status => log::debug!("{} {} {}", result.operation, id, status),
        }
        result
    }

    fn control_of(&self, id: CommandId) -> Option<Arc<CommandControl>> {
        self.lock_pending()
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.control.clone())
    }

    fn lock_pending(&self) -> MutexGuard<'_, Vec<PendingCommand>> {
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_sender(&self) -> MutexGuard<'_, Sender<Completion>> {
        self.sender
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_receiver(&self) -> MutexGuard<'_, Receiver<Completion>> {
        self.receiver
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Drive one command from Pending to a terminal status
fn run_worker(
    worker: &mut dyn Worker,
    mut context: CommandContext,
    control: &CommandControl,
) -> Completion {
    let id = context.id();
    let operation = context.operation().name().to_string();

    let status = if control.start() {
        log::debug!("Worker {} running {operation} {id}", worker.name());
        match panic::catch_unwind(AssertUnwindSafe(|| worker.execute(&mut context))) {
            Ok(Ok(())) => CommandStatus::Succeeded,
            Ok(Err(ProviderError::Cancelled { .. })) => CommandStatus::Cancelled,
            Ok(Err(e)) => {
                context.error_messages.push(e.to_string());
                CommandStatus::Failed
            }
            Err(_) => {
                log::error!("Worker {} panicked while running {id}", worker.name());
                context
                    .error_messages
                    .push(format!("worker {} panicked", worker.name()));
                CommandStatus::Failed
            }
        }
    } else {
        log::debug!("{operation} {id} cancelled before it started");
        CommandStatus::Cancelled
    };

    let status = control.finish(status);
    Completion {
        id,
        operation,
        status,
        states: std::mem::take(&mut context.states),
        info_messages: std::mem::take(&mut context.info_messages),
        error_messages: std::mem::take(&mut context.error_messages),
    }
}
