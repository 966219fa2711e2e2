//! Step: executable launcher script.
use std::path::PathBuf;

use anyhow::Result;

use super::{Context, Step, StepResult};
use crate::resources::WriteResult;
use crate::resources::fs::set_executable;
use crate::settings::DEFAULT_EDM_ENVIRONMENT;
use crate::templates::TemplateContext;

/// File name used when no output path is given.
pub const DEFAULT_LAUNCHER_NAME: &str = "pychron_launcher.sh";

/// Generate the executable launcher script.
#[derive(Debug)]
pub struct WriteLauncher;

impl WriteLauncher {
    /// Template for the platform and toolchain in `ctx`.
    #[must_use]
    pub fn template_name(ctx: &Context) -> &'static str {
        match (ctx.platform.is_desktop(), ctx.options.conda) {
            (true, true) => "launcher_mac_conda",
            (true, false) => "launcher_mac",
            (false, _) => "launcher_unix",
        }
    }

    /// Where the script is written.
    #[must_use]
    pub fn output_path(ctx: &Context) -> PathBuf {
        let output = ctx
            .options
            .launcher_output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LAUNCHER_NAME));
        if output.is_absolute() {
            output
        } else {
            ctx.work_dir.join(output)
        }
    }

    fn context(ctx: &Context) -> TemplateContext {
        let opts = &ctx.options;
        TemplateContext::new()
            .with("github_org", opts.organization.as_str())
            .with("app_name", opts.app_name.as_str())
            .with("app_id", opts.app_id.as_str())
            .with("use_login", opts.use_login)
            .with("massspec_db_version", opts.massspec_db_version.as_str())
            .with("edm_envs_root", ctx.edm_envs_root().as_path())
            .with(
                "edm_env",
                opts.edm_environment
                    .as_deref()
                    .unwrap_or(DEFAULT_EDM_ENVIRONMENT),
            )
            .with("pychron_path", ctx.checkout_dir().as_path())
    }
}

impl Step for WriteLauncher {
    fn name(&self) -> &'static str {
        "Launcher"
    }

    fn run(&self, ctx: &Context) -> Result<StepResult> {
        let template = Self::template_name(ctx);
        let output = Self::output_path(ctx);
        ctx.log.debug(&format!("launcher template: {template}"));

        let script = ctx.render(template, &Self::context(ctx))?;
        if ctx.verbose {
            ctx.log.info(&format!("Writing launcher script: {}", output.display()));
            ctx.log.info(&script);
        }

        match ctx.materializer().write(&output, &script)? {
            WriteResult::DryRun => Ok(StepResult::DryRun),
            WriteResult::Skipped => Ok(StepResult::Skipped(format!(
                "kept existing {}",
                output.display()
            ))),
            WriteResult::Written | WriteResult::Unchanged => {
                set_executable(&output)?;
                ctx.log.info(&format!("launcher: {}", output.display()));
                Ok(StepResult::Ok)
            }
        }
    }
}
