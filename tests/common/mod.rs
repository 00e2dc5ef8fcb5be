//! Shared test utilities for git-provider integration tests
//!
//! Real git repositories in temporary directories for end-to-end scenarios, and a
//! scripted process runner for exercising the provider without spawning git.

pub mod assertions;
pub mod fixtures;
pub mod repository;
pub mod runner;
