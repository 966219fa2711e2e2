//! Domain-specific error types for the provisioning engine.
//!
//! Internal modules return typed errors (e.g., [`TemplateError`],
//! [`ProcessError`]) while steps and command handlers carry them as
//! [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! PcmError
//! ├── Template(TemplateError) : unknown template, render failure
//! ├── Filesystem { path, .. } : directory creation, file writes
//! ├── Process(ProcessError)   : external tool could not start or exited non-zero
//! └── Config(ConfigError)     : settings file read/parse
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the provisioning engine.
#[derive(Error, Debug)]
pub enum PcmError {
    /// Template lookup or rendering failed.
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    /// A directory or file operation failed.
    #[error("Filesystem error at {}: {source}", .path.display())]
    Filesystem {
        /// Path that could not be created, written, or removed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// An external process could not be run or reported failure.
    #[error("Process error: {0}")]
    Process(#[from] ProcessError),

    /// The settings file could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl PcmError {
    /// Wrap an I/O error with the path it occurred on.
    #[must_use]
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }
}

/// Errors raised by the template store.
#[derive(Error, Debug)]
pub enum TemplateError {
    /// No template is registered under the requested name.
    #[error("Template not found: {0}")]
    NotFound(String),

    /// The template exists but could not be rendered (undefined variable,
    /// syntax error).
    #[error("Failed to render template '{name}': {reason}")]
    Render {
        /// Name of the template being rendered.
        name: String,
        /// Engine diagnostic, including the cause chain.
        reason: String,
    },
}

/// Errors raised when invoking external tools.
#[derive(Error, Debug)]
pub enum ProcessError {
    /// The process could not be spawned at all (binary missing, permissions).
    #[error("Failed to execute {program}: {source}")]
    Spawn {
        /// Program that was invoked.
        program: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The process ran but exited with a non-zero status.
    #[error("{program} failed (exit {}): {stderr}", .code.map_or_else(|| "signal".to_string(), |c| c.to_string()))]
    Failure {
        /// Program that was invoked.
        program: String,
        /// Exit code, `None` when terminated by a signal.
        code: Option<i32>,
        /// Trimmed standard error output.
        stderr: String,
    },
}

/// Errors raised while loading the settings file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The settings file exists but could not be read.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The settings file is not valid TOML or has unexpected keys.
    #[error("Invalid TOML in {file}: {message}")]
    InvalidSyntax {
        /// Path of the offending file.
        file: String,
        /// Parser diagnostic.
        message: String,
    },
}
