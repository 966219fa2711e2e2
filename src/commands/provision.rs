//! Command: run a single provisioning step.
use std::sync::Arc;

use anyhow::Result;

use super::{ApplyOpts, CommandSetup};
use crate::cli::GlobalOpts;
use crate::logging::Logger;
use crate::steps::Step;

/// Run `step` with the options of its subcommand.
///
/// # Errors
///
/// Returns an error if setup fails or the step records a failure.
pub fn run(
    global: &GlobalOpts,
    verbose: bool,
    opts: &dyn ApplyOpts,
    step: &dyn Step,
    log: &Arc<Logger>,
) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;
    let ctx = setup.context(global, verbose, opts, Arc::clone(log))?;
    log.info(&format!("environment: {}", ctx.env_root().display()));
    super::run_steps_to_completion([step], &ctx, log)
}
