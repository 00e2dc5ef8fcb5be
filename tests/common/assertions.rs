//! Predicates over CLI output

#![allow(dead_code)]

use predicates::prelude::*;

pub fn not_in_git_repo() -> impl Predicate<str> {
    predicates::str::contains("Not in a git repository")
}

/// Listing line description, e.g. `(modified)`
pub fn has_status(description: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("({description})"))
}

pub fn operation_succeeded(operation: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("{operation} #")).and(predicates::str::contains("completed"))
}

pub fn has_error() -> impl Predicate<str> {
    predicates::str::contains("Error:")
}
