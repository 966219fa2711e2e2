//! Writes rendered artifacts to disk, honouring overwrite, confirmation and
//! dry-run settings.
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use super::fs::{ensure_parent_dir, write_atomic};
use super::{ResourceState, WriteResult};
use crate::error::PcmError;
use crate::logging::Log;
use crate::prompt::Confirm;

/// Materializes file content at a target path.
///
/// Existing files are replaced only when `overwrite` is set or the operator
/// confirms; files already holding the desired content are left untouched.
pub struct FileMaterializer {
    /// Replace existing files without asking.
    pub overwrite: bool,
    /// Log each path and echo the content at debug level.
    pub verbose: bool,
    /// Log intended writes without touching the filesystem.
    pub dry_run: bool,
    confirm: Arc<dyn Confirm>,
    log: Arc<dyn Log>,
}

impl std::fmt::Debug for FileMaterializer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileMaterializer")
            .field("overwrite", &self.overwrite)
            .field("verbose", &self.verbose)
            .field("dry_run", &self.dry_run)
            .field("confirm", &"<dyn Confirm>")
            .field("log", &"<dyn Log>")
            .finish()
    }
}

impl FileMaterializer {
    /// Create a materializer with all flags off.
    #[must_use]
    pub fn new(confirm: Arc<dyn Confirm>, log: Arc<dyn Log>) -> Self {
        Self {
            overwrite: false,
            verbose: false,
            dry_run: false,
            confirm,
            log,
        }
    }

    /// Set the overwrite flag.
    #[must_use]
    pub const fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Set the verbose flag.
    #[must_use]
    pub const fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Set the dry-run flag.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Compare the file at `path` with `content`.
    ///
    /// # Errors
    ///
    /// Returns [`PcmError::Filesystem`] if an existing target cannot be read.
    pub fn current_state(path: &Path, content: &str) -> Result<ResourceState, PcmError> {
        if !path.exists() {
            return Ok(ResourceState::Missing);
        }
        let existing = std::fs::read(path).map_err(|e| PcmError::filesystem(path, e))?;
        if existing == content.as_bytes() {
            Ok(ResourceState::Correct)
        } else {
            Ok(ResourceState::Incorrect)
        }
    }

    /// Write `content` to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the target cannot be read or written, or if the
    /// confirmation prompt fails.
    pub fn write(&self, path: &Path, content: &str) -> Result<WriteResult> {
        let state = Self::current_state(path, content)?;
        if state == ResourceState::Correct {
            self.log.debug(&format!("unchanged: {}", path.display()));
            return Ok(WriteResult::Unchanged);
        }

        if self.dry_run {
            let verb = if state == ResourceState::Missing {
                "create"
            } else {
                "overwrite"
            };
            self.log.dry_run(&format!("would {verb} {}", path.display()));
            return Ok(WriteResult::DryRun);
        }

        if state == ResourceState::Incorrect
            && !self.overwrite
            && !self
                .confirm
                .confirm(&format!("{} already exists. Overwrite?", path.display()))?
        {
            self.log.warn(&format!("kept existing {}", path.display()));
            return Ok(WriteResult::Skipped);
        }

        if self.verbose {
            self.log.info(&format!("writing {}", path.display()));
            self.log.debug(content);
        } else {
            self.log.debug(&format!("writing {}", path.display()));
        }

        ensure_parent_dir(path)?;
        write_atomic(path, content)?;
        Ok(WriteResult::Written)
    }
}
