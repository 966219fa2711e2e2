//! Step: clone the Pychron source.
use anyhow::{Context as _, Result};

use super::{Context, Step, StepResult};
use crate::resources::fs::remove_tree;

/// Question asked before an existing checkout is deleted.
pub const RECLONE_PROMPT: &str = "Pychron source code already exists. Remove and re-clone?";

/// Clone URL for `fork`.
#[must_use]
pub fn clone_url(fork: &str) -> String {
    format!("https://github.com/{fork}/pychron.git")
}

/// Clone the Pychron source into `<home>/.pychron.<app_id>/pychron`.
///
/// An existing checkout is only replaced after confirmation; otherwise its
/// `git status` is shown and the step is skipped.
#[derive(Debug)]
pub struct CheckoutCode;

impl Step for CheckoutCode {
    fn name(&self) -> &'static str {
        "Code checkout"
    }

    fn run(&self, ctx: &Context) -> Result<StepResult> {
        let app_dir = format!(".pychron.{}", ctx.options.app_id);
        let dest = ctx.ensure_dir(&ctx.home, &[app_dir.as_str()])?.join("pychron");
        let git = ctx.options.git.as_str();

        if dest.is_dir() {
            if ctx.dry_run {
                ctx.log.dry_run(&format!(
                    "would ask before replacing checkout {}",
                    dest.display()
                ));
                return Ok(StepResult::DryRun);
            }
            if !ctx.confirm.confirm(RECLONE_PROMPT)? {
                show_status(ctx, git, &dest)?;
                return Ok(StepResult::Skipped("kept existing checkout".to_string()));
            }
            ctx.log.info(&format!("removing {}", dest.display()));
            remove_tree(&dest)?;
        }

        let url = clone_url(&ctx.options.fork);
        let branch = format!("--branch={}", ctx.options.branch);
        let dest_arg = dest.to_string_lossy();

        if ctx.dry_run {
            ctx.log.dry_run(&format!(
                "would run: {git} clone {url} {branch} {dest_arg}"
            ));
            return Ok(StepResult::DryRun);
        }

        let branch_name = &ctx.options.branch;
        ctx.log.info(&format!("cloning {url} ({branch_name}) into {dest_arg}"));
        ctx.executor
            .run_streaming(git, &["clone", &url, &branch, &dest_arg])
            .with_context(|| format!("cloning {url}"))?;
        show_status(ctx, git, &dest)?;
        Ok(StepResult::Ok)
    }
}

/// Run `git status` in `dir` and echo its output.
fn show_status(ctx: &Context, git: &str, dir: &std::path::Path) -> Result<()> {
    let status = ctx
        .executor
        .run_in(Some(dir), git, &["status"])
        .with_context(|| format!("git status in {}", dir.display()))?;
    for line in status.stdout.lines() {
        ctx.log.info(line);
    }
    Ok(())
}
