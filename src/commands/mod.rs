//! Subcommand orchestration: resolve options, build the step context and
//! run steps to completion.
pub mod provision;
pub mod version;
pub mod wizard;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};

use crate::cli::{
    AppOpts, CodeOpts, GlobalOpts, HardwareOpts, IdentityOpts, InitOpts, LauncherFlags,
    LauncherOpts, OrgOpts, SourceOpts, WizardOpts,
};
use crate::error::PcmError;
use crate::exec::{Executor, SystemExecutor};
use crate::logging::{Log, Logger};
use crate::platform::Platform;
use crate::prompt::{AssumeYes, Confirm, TerminalConfirm};
use crate::settings::{self, Settings};
use crate::steps::{self, Context, ProvisionOptions, Step};

/// Step options a subcommand contributes on top of the settings file.
pub trait ApplyOpts {
    /// Override fields of `opts` with the values given on the command line.
    fn apply(&self, opts: &mut ProvisionOptions);
}

/// Options carried by a subcommand without step flags.
#[derive(Debug)]
pub struct NoOpts;

impl ApplyOpts for NoOpts {
    fn apply(&self, _: &mut ProvisionOptions) {}
}

impl ApplyOpts for HardwareOpts {
    fn apply(&self, opts: &mut ProvisionOptions) {
        opts.ngx |= self.ngx;
    }
}

impl ApplyOpts for OrgOpts {
    fn apply(&self, opts: &mut ProvisionOptions) {
        if let Some(org) = &self.org {
            opts.organization.clone_from(org);
        }
    }
}

impl ApplyOpts for SourceOpts {
    fn apply(&self, opts: &mut ProvisionOptions) {
        if let Some(fork) = &self.fork {
            opts.fork.clone_from(fork);
        }
        if let Some(branch) = &self.branch {
            opts.branch.clone_from(branch);
        }
    }
}

impl ApplyOpts for IdentityOpts {
    fn apply(&self, opts: &mut ProvisionOptions) {
        if let Some(app_id) = &self.app_id {
            opts.app_id.clone_from(app_id);
        }
    }
}

impl ApplyOpts for AppOpts {
    fn apply(&self, opts: &mut ProvisionOptions) {
        if let Some(env) = &self.environment {
            opts.edm_environment = Some(env.clone());
        }
        if let Some(app) = &self.app {
            opts.app_name.clone_from(app);
        }
    }
}

impl ApplyOpts for LauncherFlags {
    fn apply(&self, opts: &mut ProvisionOptions) {
        opts.conda |= self.conda;
        opts.use_login |= self.login;
        if let Some(msv) = &self.msv {
            opts.massspec_db_version.clone_from(msv);
        }
        if let Some(output) = &self.output {
            opts.launcher_output = Some(output.clone());
        }
    }
}

impl ApplyOpts for InitOpts {
    fn apply(&self, opts: &mut ProvisionOptions) {
        self.hardware.apply(opts);
        self.org.apply(opts);
        self.source.apply(opts);
        self.identity.apply(opts);
    }
}

impl ApplyOpts for CodeOpts {
    fn apply(&self, opts: &mut ProvisionOptions) {
        self.source.apply(opts);
        self.identity.apply(opts);
    }
}

impl ApplyOpts for LauncherOpts {
    fn apply(&self, opts: &mut ProvisionOptions) {
        self.org.apply(opts);
        self.identity.apply(opts);
        self.app.apply(opts);
        self.launcher.apply(opts);
    }
}

impl ApplyOpts for WizardOpts {
    fn apply(&self, opts: &mut ProvisionOptions) {
        self.hardware.apply(opts);
        self.org.apply(opts);
        self.source.apply(opts);
        self.identity.apply(opts);
        self.app.apply(opts);
        self.launcher.apply(opts);
    }
}

/// Layer `settings` over the built-in defaults for `platform`.
#[must_use]
pub fn options_from_settings(settings: &Settings, platform: &Platform) -> ProvisionOptions {
    let mut opts = ProvisionOptions::defaults_for(platform);
    let overrides = [
        (&settings.organization, &mut opts.organization),
        (&settings.fork, &mut opts.fork),
        (&settings.branch, &mut opts.branch),
        (&settings.app_id, &mut opts.app_id),
        (&settings.app_name, &mut opts.app_name),
        (&settings.massspec_db_version, &mut opts.massspec_db_version),
        (&settings.git, &mut opts.git),
        (&settings.edm, &mut opts.edm),
    ];
    for (value, field) in overrides {
        if let Some(value) = value {
            field.clone_from(value);
        }
    }
    opts.edm_environment.clone_from(&settings.edm_environment);
    opts
}

/// Resolve the home directory from `--home` or the environment.
///
/// # Errors
///
/// Returns an error if no override is given and neither `HOME` nor
/// `USERPROFILE` is set.
pub fn resolve_home(global: &GlobalOpts) -> Result<PathBuf> {
    if let Some(home) = &global.home {
        return Ok(home.clone());
    }
    let home = if cfg!(target_os = "windows") {
        std::env::var("USERPROFILE").or_else(|_| std::env::var("HOME"))
    } else {
        std::env::var("HOME")
    }
    .map_err(|_| anyhow::anyhow!("cannot determine home directory; use --home"))?;
    Ok(PathBuf::from(home))
}

/// Shared state produced by the common command setup sequence.
#[derive(Debug)]
pub struct CommandSetup {
    /// Detected platform.
    pub platform: Platform,
    /// Settings file contents (empty when no file exists).
    pub settings: Settings,
    /// Home directory.
    pub home: PathBuf,
}

impl CommandSetup {
    /// Detect the platform, resolve the home directory and load settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined or the
    /// settings file cannot be parsed.
    pub fn init(global: &GlobalOpts, log: &Logger) -> Result<Self> {
        let platform = Platform::detect();
        let home = resolve_home(global)?;
        let settings = Settings::load(global.config.as_deref()).map_err(PcmError::Config)?;
        log.debug(&format!("platform: {}", platform.os));
        log.debug(&format!("home: {}", home.display()));
        Ok(Self {
            platform,
            settings,
            home,
        })
    }

    /// Build the step context for a subcommand whose flags are `cli_opts`.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded templates fail to load or the
    /// working directory cannot be read.
    pub fn context(
        &self,
        global: &GlobalOpts,
        verbose: bool,
        cli_opts: &dyn ApplyOpts,
        log: Arc<Logger>,
    ) -> Result<Context> {
        let mut options = options_from_settings(&self.settings, &self.platform);
        cli_opts.apply(&mut options);

        let env_name = global
            .env
            .as_deref()
            .or(self.settings.env.as_deref())
            .unwrap_or(settings::DEFAULT_ENV);

        let confirm: Arc<dyn Confirm> = if global.yes {
            Arc::new(AssumeYes)
        } else {
            Arc::new(TerminalConfirm)
        };
        let work_dir = std::env::current_dir().context("reading working directory")?;

        Ok(Context::new(
            self.home.clone(),
            env_name,
            self.platform.clone(),
            options,
            log as Arc<dyn Log>,
            Arc::new(SystemExecutor) as Arc<dyn Executor>,
            confirm,
        )?
        .with_flags(global.overwrite, verbose, global.dry_run)
        .with_work_dir(work_dir))
    }
}

/// Execute every step in order, print the summary, and bail if any step failed.
///
/// # Errors
///
/// Returns an error if one or more steps recorded a failure.
pub fn run_steps_to_completion<'a>(
    steps: impl IntoIterator<Item = &'a dyn Step>,
    ctx: &Context,
    log: &Logger,
) -> Result<()> {
    for step in steps {
        steps::execute(step, ctx);
    }

    log.print_summary();

    let count = log.failure_count();
    if count > 0 {
        anyhow::bail!("{count} step(s) failed");
    }
    Ok(())
}
