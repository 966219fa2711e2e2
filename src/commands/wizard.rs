//! Command: run every provisioning step in order.
use std::sync::Arc;

use anyhow::Result;

use super::CommandSetup;
use crate::cli::{GlobalOpts, WizardOpts};
use crate::logging::Logger;
use crate::steps;

/// Run the wizard.
///
/// Steps keep running after a failure so the summary covers every step.
///
/// # Errors
///
/// Returns an error if setup fails or any step records a failure.
pub fn run(global: &GlobalOpts, verbose: bool, opts: &WizardOpts, log: &Arc<Logger>) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;
    let ctx = setup.context(global, verbose, opts, Arc::clone(log))?;

    log.info(&format!("pcm {}", super::version::current()));
    log.info(&format!("environment: {}", ctx.env_root().display()));

    let all = steps::all_steps();
    super::run_steps_to_completion(all.iter().map(AsRef::as_ref), &ctx, log)
}
