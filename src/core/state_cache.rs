//! Shared cache of per-file source control state.
//!
//! This module defines [`StateCache`], the mapping from normalized path to
//! [`FileState`] that callers read at any time. Reads hand out clones so a reader
//! never observes a bulk update half applied.
//!
//! # Public API
//! - [`StateCache::get_or_create`]: Read an entry, inserting an Unknown default on a miss
//! - [`StateCache::bulk_update`]: Apply a batch of fresh states and notify once
//!
//! # Write Discipline
//! Only command reconciliation calls [`StateCache::bulk_update`]. Entries are never
//! removed: an Unknown entry is itself information.

use crate::core::{
    signal::{HandlerId, StateChangedSignal},
    state::FileState,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
pub struct StateCache {
    states: RwLock<HashMap<PathBuf, FileState>>,
    on_changed: StateChangedSignal,
}

impl StateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached state for `path`, creating an Unknown entry if there is none.
    ///
    /// `path` must already be normalized.
    pub fn get_or_create(&self, path: &Path) -> FileState {
        if let Some(state) = self.get(path) {
            return state;
        }

        self.write()
            .entry(path.to_path_buf())
            .or_insert_with(|| {
                log::debug!("Creating unknown state for {}", path.display());
                FileState::unknown(path)
            })
            .clone()
    }

    pub fn get(&self, path: &Path) -> Option<FileState> {
        self.read().get(path).cloned()
    }

    /// Replace or create one entry per state, then fire the change signal once.
    pub fn bulk_update(&self, results: Vec<FileState>) {
        if results.is_empty() {
            return;
        }

        let count = results.len();
        {
            let mut states = self.write();
            for state in results {
                states.insert(state.path().to_path_buf(), state);
            }
        }

        log::debug!("Applied {count} state update(s) to the cache");
        self.on_changed.broadcast();
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Copy of every entry, sorted by path
    pub fn snapshot(&self) -> Vec<FileState> {
        let mut states: Vec<FileState> = self.read().values().cloned().collect();
        states.sort_by(|a, b| a.path().cmp(b.path()));
        states
    }

    /// Copy of every entry matching `predicate`, sorted by path
    pub fn states_matching<P>(&self, predicate: P) -> Vec<FileState>
    where
        P: Fn(&FileState) -> bool,
    {
        let mut states: Vec<FileState> = self
            .read()
            .values()
            .filter(|state| predicate(state))
            .cloned()
            .collect();
        states.sort_by(|a, b| a.path().cmp(b.path()));
        states
    }

    pub fn register_state_changed<F>(&self, handler: F) -> HandlerId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_changed.register(handler)
    }

    pub fn unregister_state_changed(&self, id: HandlerId) -> bool {
        self.on_changed.unregister(id)
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<PathBuf, FileState>> {
        self.states
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<PathBuf, FileState>> {
        self.states
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
