//! Core logging types: step entries, status, and the [`Log`] trait.

/// Step execution result for summary reporting.
#[derive(Debug, Clone)]
pub struct TaskEntry {
    /// Human-readable step name.
    pub name: String,
    /// Final status of the step.
    pub status: TaskStatus,
    /// Optional detail message (e.g., skip reason or error description).
    pub message: Option<String>,
}

/// Status of a completed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Step completed successfully.
    Ok,
    /// Step does not apply to the current options or platform.
    NotApplicable,
    /// Step chose not to act (e.g., operator kept an existing checkout).
    Skipped,
    /// Step ran in dry-run mode; no changes were applied.
    DryRun,
    /// Step encountered an error and could not complete.
    Failed,
}

/// Abstraction over logging backends.
///
/// Step code logs through `Arc<dyn Log>` so tests can run against a logger
/// without a global subscriber installed.
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (suppressed on console unless verbose).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log a dry-run action message.
    fn dry_run(&self, msg: &str);
    /// Record a step result for the summary.
    fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>);
}
