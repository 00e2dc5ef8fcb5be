//! Change notification signal.
//!
//! Subscribers register a `Fn()` handler and get back a [`HandlerId`] used to
//! unregister. Handlers run in registration order. The handler list is copied
//! before dispatch, so a handler registered while a notification is being
//! delivered only sees the next one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

pub type StateChangedHandler = Arc<dyn Fn() + Send + Sync>;

/// Handle returned by [`StateChangedSignal::register`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

#[derive(Default)]
pub struct StateChangedSignal {
    handlers: Mutex<Vec<(HandlerId, StateChangedHandler)>>,
    next_id: AtomicU64,
}

impl StateChangedSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&self, handler: F) -> HandlerId
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = HandlerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.lock().push((id, Arc::new(handler)));
        id
    }

    /// Returns false when the handler was not registered
    pub fn unregister(&self, id: HandlerId) -> bool {
        let mut handlers = self.lock();
        let before = handlers.len();
        handlers.retain(|(handler_id, _)| *handler_id != id);
        handlers.len() != before
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn broadcast(&self) {
        let snapshot: Vec<StateChangedHandler> =
            self.lock().iter().map(|(_, handler)| handler.clone()).collect();
        log::debug!("Notifying {} state change handler(s)", snapshot.len());
        for handler in snapshot {
            handler();
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(HandlerId, StateChangedHandler)>> {
        // A panicking handler must not disable notifications for everyone else
        self.handlers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_handlers_run_in_registration_order() {
        let signal = StateChangedSignal::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for name in ["first", "second", "third"] {
            let order = order.clone();
            signal.register(move || order.lock().unwrap().push(name));
        }

        signal.broadcast();
        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_unregister_stops_delivery() {
        let signal = StateChangedSignal::new();
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let id = signal.register(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        signal.broadcast();
        assert!(signal.unregister(id));
        assert!(!signal.unregister(id));
        signal.broadcast();

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(signal.is_empty());
    }

    #[test]
    fn test_handler_added_during_dispatch_waits_for_next_broadcast() {
        let signal = Arc::new(StateChangedSignal::new());
        let late_calls = Arc::new(AtomicUsize::new(0));

        let registering_signal = signal.clone();
        let late = late_calls.clone();
        signal.register(move || {
            let late = late.clone();
            registering_signal.register(move || {
                late.fetch_add(1, Ordering::SeqCst);
            });
        });

        signal.broadcast();
        assert_eq!(late_calls.load(Ordering::SeqCst), 0);

        signal.broadcast();
        assert_eq!(late_calls.load(Ordering::SeqCst), 1);
    }
}
