//! Idempotent filesystem primitives used by provisioning steps.
pub mod artifact;
pub mod fs;

/// State of a target file relative to the content a step wants to write.
///
/// # Examples
///
/// ```
/// use pcm_cli::resources::ResourceState;
///
/// let missing = ResourceState::Missing;
///
/// assert_ne!(missing, ResourceState::Correct);
/// assert_ne!(missing, ResourceState::Incorrect);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceState {
    /// Target does not exist.
    Missing,
    /// Target exists and already holds the desired content.
    Correct,
    /// Target exists with different content.
    Incorrect,
}

/// Outcome of materializing one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// Content was written to the target.
    Written,
    /// The operator declined to overwrite an existing file.
    Skipped,
    /// The target already held identical content.
    Unchanged,
    /// Dry run: the write was only logged.
    DryRun,
}

/// Per-step tally of [`WriteResult`]s, used for the step's closing log line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteStats {
    /// Files written.
    pub written: u32,
    /// Files left alone after a declined prompt.
    pub skipped: u32,
    /// Files already up to date.
    pub unchanged: u32,
    /// Files that would have been written in a dry run.
    pub dry_run: u32,
}

impl WriteStats {
    /// Count one result.
    pub const fn record(&mut self, result: WriteResult) {
        match result {
            WriteResult::Written => self.written += 1,
            WriteResult::Skipped => self.skipped += 1,
            WriteResult::Unchanged => self.unchanged += 1,
            WriteResult::DryRun => self.dry_run += 1,
        }
    }

    /// One-line summary, e.g. `"3 written, 1 unchanged"`.
    #[must_use]
    pub fn summary(&self) -> String {
        let parts: Vec<String> = [
            (self.written, "written"),
            (self.unchanged, "unchanged"),
            (self.skipped, "skipped"),
            (self.dry_run, "would write"),
        ]
        .iter()
        .filter(|(n, _)| *n > 0)
        .map(|(n, label)| format!("{n} {label}"))
        .collect();
        if parts.is_empty() {
            "nothing to write".to_string()
        } else {
            parts.join(", ")
        }
    }
}
