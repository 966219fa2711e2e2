//! Step: email credentials stub.
use anyhow::Result;

use super::{Context, Step, StepResult, materialize_all};
use crate::resources::WriteStats;

/// Write the SMTP credential stub to `<env>/.appdata/credentials.json`.
#[derive(Debug)]
pub struct WriteEmailCredentials;

impl Step for WriteEmailCredentials {
    fn name(&self) -> &'static str {
        "Email credentials"
    }

    fn run(&self, ctx: &Context) -> Result<StepResult> {
        let appdata = ctx.ensure_dir(&ctx.env_root(), &[".appdata"])?;
        let mut stats = WriteStats::default();
        materialize_all(ctx, &appdata, &["credentials.json"], &mut stats)?;
        Ok(StepResult::from_writes(ctx, &stats))
    }
}
