//! Git executors, one per operation kind.
//!
//! Each worker turns one operation into git invocations through the command's
//! [`ProcessRunner`](crate::core::process::ProcessRunner) and leaves the refreshed
//! states in the command's result buffer.

pub mod check_in;
pub mod check_out;
pub mod connect;
pub mod delete;
pub mod mark_for_add;
pub mod revert;
pub mod status;
pub mod update_status;

pub use check_in::CheckInWorker;
pub use check_out::CheckOutWorker;
pub use connect::ConnectWorker;
pub use delete::DeleteWorker;
pub use mark_for_add::MarkForAddWorker;
pub use revert::RevertWorker;
pub use status::{collect_status, parse_porcelain, refresh_status};
pub use update_status::UpdateStatusWorker;

use crate::core::{operation, worker::WorkerRegistry};

/// Register the git worker for every built-in operation
pub fn register_default_workers(registry: &mut WorkerRegistry) {
    registry.register(operation::CONNECT, || Box::new(ConnectWorker));
    registry.register(operation::UPDATE_STATUS, || Box::new(UpdateStatusWorker));
    registry.register(operation::CHECK_OUT, || Box::new(CheckOutWorker));
    registry.register(operation::CHECK_IN, || Box::new(CheckInWorker));
    registry.register(operation::REVERT, || Box::new(RevertWorker));
    registry.register(operation::MARK_FOR_ADD, || Box::new(MarkForAddWorker));
    registry.register(operation::DELETE, || Box::new(DeleteWorker));
}
