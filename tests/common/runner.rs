//! Scripted process runner for provider tests that must not spawn git

#![allow(dead_code)]

use git_provider::core::{
    error::Result,
    process::{ProcessRunner, RunOutput},
};
use std::path::Path;
use std::sync::{Arc, Mutex};

type Responder = Box<dyn Fn(&str, &[String]) -> RunOutput + Send + Sync>;

/// Answers every invocation from a closure and records it
pub struct ScriptedRunner {
    respond: Responder,
    calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl ScriptedRunner {
    pub fn new<F>(respond: F) -> Arc<Self>
    where
        F: Fn(&str, &[String]) -> RunOutput + Send + Sync + 'static,
    {
        Arc::new(Self {
            respond: Box::new(respond),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Reports `lines` for every `status` call; every other command succeeds silently
    pub fn with_status(lines: &[&str]) -> Arc<Self> {
        let lines: Vec<String> = lines.iter().map(|line| line.to_string()).collect();
        Self::new(move |command, _| match command {
            "status" => RunOutput::success(lines.clone()),
            "version" => RunOutput::success(vec!["git version 2.44.0".to_string()]),
            "rev-parse" => RunOutput::success(vec!["true".to_string()]),
            _ => RunOutput::success(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, command: &str) -> usize {
        self.calls()
            .iter()
            .filter(|(called, _)| called == command)
            .count()
    }
}

impl ProcessRunner for ScriptedRunner {
    fn run(&self, _working_dir: &Path, command: &str, args: &[String]) -> Result<RunOutput> {
        self.calls
            .lock()
            .unwrap()
            .push((command.to_string(), args.to_vec()));
        Ok((self.respond)(command, args))
    }
}
