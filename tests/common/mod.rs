// Shared helpers for integration tests.
//
// Provides a temporary home directory, an executor that records instead of
// spawning, and a builder for the step context so each integration test runs
// against an isolated environment.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use pcm_cli::error::PcmError;
use pcm_cli::exec::{ExecResult, Executor};
use pcm_cli::logging::Logger;
use pcm_cli::platform::{Os, Platform};
use pcm_cli::prompt::{AssumeYes, Confirm, ScriptedConfirm};
use pcm_cli::steps::{Context, ProvisionOptions};

/// Executor that records every command line and always succeeds.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    calls: Mutex<Vec<String>>,
}

impl RecordingExecutor {
    /// Command lines run so far, as `program arg1 arg2 ...`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }
}

impl RecordingExecutor {
    fn record(&self, program: &str, args: &[&str]) {
        let line = std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        self.calls.lock().expect("calls lock").push(line);
    }
}

impl Executor for RecordingExecutor {
    fn run_in(
        &self,
        _dir: Option<&Path>,
        program: &str,
        args: &[&str],
    ) -> Result<ExecResult, PcmError> {
        self.record(program, args);
        Ok(ExecResult {
            success: true,
            code: Some(0),
            ..ExecResult::default()
        })
    }

    fn run_streaming(&self, program: &str, args: &[&str]) -> Result<(), PcmError> {
        self.record(program, args);
        Ok(())
    }

    fn which(&self, _: &str) -> bool {
        true
    }
}

/// An isolated home directory backed by a [`tempfile::TempDir`].
pub struct IntegrationTestContext {
    /// Temporary home directory.
    pub home: tempfile::TempDir,
    /// Executor shared with every context built from this fixture.
    pub executor: Arc<RecordingExecutor>,
    /// Logger shared with every context built from this fixture.
    pub log: Arc<Logger>,
}

impl IntegrationTestContext {
    /// Create a fresh, empty home directory.
    pub fn new() -> Self {
        Self {
            home: tempfile::tempdir().expect("create temp dir"),
            executor: Arc::new(RecordingExecutor::default()),
            log: Arc::new(Logger::new("test")),
        }
    }

    /// Path to the home directory.
    pub fn home_path(&self) -> &Path {
        self.home.path()
    }

    /// `<home>/Pychron`.
    pub fn env_root(&self) -> PathBuf {
        self.home.path().join("Pychron")
    }

    /// Build a context for `os` that answers yes to every prompt.
    pub fn context(&self, os: Os) -> Context {
        self.context_with(os, Arc::new(AssumeYes), |_| {})
    }

    /// Build a context for `os` that answers prompts from `answers`.
    pub fn scripted(&self, os: Os, answers: Vec<bool>) -> Context {
        self.context_with(os, Arc::new(ScriptedConfirm::new(answers)), |_| {})
    }

    /// Build a context with a custom confirmation source and options.
    pub fn context_with(
        &self,
        os: Os,
        confirm: Arc<dyn Confirm>,
        configure: impl FnOnce(&mut ProvisionOptions),
    ) -> Context {
        let platform = Platform::new(os);
        let mut options = ProvisionOptions::defaults_for(&platform);
        configure(&mut options);
        Context::new(
            self.home.path().to_path_buf(),
            "Pychron",
            platform,
            options,
            Arc::clone(&self.log) as _,
            Arc::clone(&self.executor) as _,
            confirm,
        )
        .expect("build context")
    }
}
