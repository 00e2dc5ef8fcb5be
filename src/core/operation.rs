//! Operation requests.
//!
//! An [`Operation`] names the kind of work a caller wants (the key the worker
//! registry is indexed by) and carries the few parameters some kinds need.

use std::fmt;

pub const CONNECT: &str = "Connect";
pub const UPDATE_STATUS: &str = "UpdateStatus";
pub const CHECK_OUT: &str = "CheckOut";
pub const CHECK_IN: &str = "CheckIn";
pub const REVERT: &str = "Revert";
pub const MARK_FOR_ADD: &str = "MarkForAdd";
pub const DELETE: &str = "Delete";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    name: String,
    description: Option<String>,
}

impl Operation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    /// Commit message for `CheckIn`
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn connect() -> Self {
        Self::new(CONNECT)
    }

    pub fn update_status() -> Self {
        Self::new(UPDATE_STATUS)
    }

    pub fn check_out() -> Self {
        Self::new(CHECK_OUT)
    }

    pub fn check_in(description: impl Into<String>) -> Self {
        Self::new(CHECK_IN).with_description(description)
    }

    pub fn revert() -> Self {
        Self::new(REVERT)
    }

    pub fn mark_for_add() -> Self {
        Self::new(MARK_FOR_ADD)
    }

    pub fn delete() -> Self {
        Self::new(DELETE)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
