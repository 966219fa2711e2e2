//! Named provisioning steps composed from templates, the file materializer
//! and external tools.
mod context;
pub mod code;
pub mod email;
pub mod init;
pub mod launcher;
pub mod login;
pub mod packages;
pub mod scripts;
pub mod setupfiles;

pub use context::{Context, ProvisionOptions};

use anyhow::Result;

use crate::logging::TaskStatus;
use crate::resources::WriteStats;

/// Result of a single step execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepResult {
    /// Step completed.
    Ok,
    /// Step chose not to act.
    Skipped(String),
    /// Step ran in dry-run mode.
    DryRun,
}

impl StepResult {
    /// Map the outcome of a batch of writes onto a step result.
    #[must_use]
    pub fn from_writes(ctx: &Context, stats: &WriteStats) -> Self {
        ctx.log.info(&stats.summary());
        if ctx.dry_run {
            Self::DryRun
        } else {
            Self::Ok
        }
    }
}

/// A named provisioning step.
pub trait Step: Send + Sync {
    /// Human-readable step name.
    fn name(&self) -> &str;

    /// Whether this step applies to the current options and platform.
    fn should_run(&self, _ctx: &Context) -> bool {
        true
    }

    /// Execute the step.
    ///
    /// # Errors
    ///
    /// Returns an error if a template cannot be rendered, a file cannot be
    /// written, or an external tool fails.
    fn run(&self, ctx: &Context) -> Result<StepResult>;
}

/// Every step, in the order the wizard runs them.
#[must_use]
pub fn all_steps() -> Vec<Box<dyn Step>> {
    vec![
        Box::new(scripts::WriteScripts),
        Box::new(setupfiles::WriteSetupFiles),
        Box::new(init::WriteInitialization),
        Box::new(email::WriteEmailCredentials),
        Box::new(code::CheckoutCode),
        Box::new(login::WriteLoginFiles),
        Box::new(packages::InstallPackages),
        Box::new(launcher::WriteLauncher),
    ]
}

/// Execute a step, recording the result in the logger.
pub fn execute(step: &dyn Step, ctx: &Context) {
    if !step.should_run(ctx) {
        ctx.log.debug(&format!("skipping step: {} (not applicable)", step.name()));
        ctx.log.record_task(step.name(), TaskStatus::NotApplicable, None);
        return;
    }

    ctx.log.stage(step.name());

    match step.run(ctx) {
        Ok(StepResult::Ok) => {
            ctx.log.record_task(step.name(), TaskStatus::Ok, None);
        }
        Ok(StepResult::Skipped(reason)) => {
            ctx.log.info(&format!("skipped: {reason}"));
            ctx.log.record_task(step.name(), TaskStatus::Skipped, Some(&reason));
        }
        Ok(StepResult::DryRun) => {
            ctx.log.record_task(step.name(), TaskStatus::DryRun, None);
        }
        Err(e) => {
            ctx.log.error(&format!("{}: {e:#}", step.name()));
            ctx.log
                .record_task(step.name(), TaskStatus::Failed, Some(&format!("{e:#}")));
        }
    }
}

/// Render each template in `names` into `dir` and tally the results.
///
/// # Errors
///
/// Returns the first render or write error.
pub(crate) fn materialize_all(
    ctx: &Context,
    dir: &std::path::Path,
    names: &[&str],
    stats: &mut WriteStats,
) -> Result<()> {
    let empty = crate::templates::TemplateContext::new();
    for name in names {
        stats.record(ctx.materialize(dir, name, &empty)?);
    }
    Ok(())
}


#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::platform::Os;
    use test_helpers::harness;

    struct MockStep {
        name: &'static str,
        should_run: bool,
        result: Result<StepResult, String>,
    }

    impl Step for MockStep {
        fn name(&self) -> &str {
            self.name
        }
        fn should_run(&self, _ctx: &Context) -> bool {
            self.should_run
        }
        fn run(&self, _ctx: &Context) -> Result<StepResult> {
            self.result.clone().map_err(|s| anyhow::anyhow!("{s}"))
        }
    }

    fn run_mock(should_run: bool, result: Result<StepResult, String>) -> TaskStatus {
        let h = harness(Os::Linux, vec![]);
        let step = MockStep {
            name: "mock",
            should_run,
            result,
        };
        execute(&step, &h.ctx);
        let entries = h.log.task_entries();
        assert_eq!(entries.len(), 1);
        entries[0].status
    }

    #[test]
    fn execute_records_not_applicable() {
        assert_eq!(
            run_mock(false, Ok(StepResult::Ok)),
            TaskStatus::NotApplicable
        );
    }

    #[test]
    fn execute_records_ok() {
        assert_eq!(run_mock(true, Ok(StepResult::Ok)), TaskStatus::Ok);
    }

    #[test]
    fn execute_records_skipped() {
        assert_eq!(
            run_mock(true, Ok(StepResult::Skipped("kept".to_string()))),
            TaskStatus::Skipped
        );
    }

    #[test]
    fn execute_records_dry_run() {
        assert_eq!(run_mock(true, Ok(StepResult::DryRun)), TaskStatus::DryRun);
    }

    #[test]
    fn execute_records_failure() {
        let h = harness(Os::Linux, vec![]);
        let step = MockStep {
            name: "broken",
            should_run: true,
            result: Err("template missing".to_string()),
        };
        execute(&step, &h.ctx);
        assert_eq!(h.log.failure_count(), 1);
        assert_eq!(
            h.log.task_entries()[0].message.as_deref(),
            Some("template missing")
        );
    }

    #[test]
    fn step_catalogue_order() {
        let names: Vec<String> = all_steps().iter().map(|s| s.name().to_string()).collect();
        insta::assert_yaml_snapshot!(names, @r"
        - Scripts
        - Setup files
        - Initialization
        - Email credentials
        - Code checkout
        - Login files
        - Package install
        - Launcher
        ");
    }

    #[test]
    fn dry_run_ensure_dir_creates_nothing() {
        let mut h = harness(Os::Linux, vec![]);
        h.ctx.dry_run = true;
        let root = h.ctx.env_root();
        let path = h.ctx.ensure_dir(&root, &["scripts"]).unwrap();
        assert_eq!(path, root.join("scripts"));
        assert!(!root.exists());
    }

    #[test]
    fn unknown_template_is_typed_template_error() {
        use crate::error::{PcmError, TemplateError};
        let h = harness(Os::Linux, vec![]);
        let err = h
            .ctx
            .render("launcher_win", &crate::templates::TemplateContext::new())
            .unwrap_err();
        assert!(matches!(
            err,
            PcmError::Template(TemplateError::NotFound(name)) if name == "launcher_win"
        ));
    }

    #[test]
    fn app_paths_follow_app_id() {
        let mut h = harness(Os::Linux, vec![]);
        h.ctx.options.app_id = "3".to_string();
        assert_eq!(h.ctx.app_root(), h.home.path().join(".pychron.3"));
        assert_eq!(
            h.ctx.checkout_dir(),
            h.home.path().join(".pychron.3").join("pychron")
        );
    }
}
