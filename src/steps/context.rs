//! Shared step context and resolved options.
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};

use crate::error::PcmError;
use crate::exec::Executor;
use crate::logging::Log;
use crate::platform::Platform;
use crate::prompt::Confirm;
use crate::resources::WriteResult;
use crate::resources::artifact::FileMaterializer;
use crate::resources::fs::ensure_dir;
use crate::settings;
use crate::templates::{TemplateContext, TemplateStore};

/// Step-specific options, resolved from CLI flags, the settings file and
/// built-in defaults before any step runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionOptions {
    /// Materialize NGX device files and preferences.
    pub ngx: bool,
    /// GitHub organization holding the data repositories.
    pub organization: String,
    /// Fork of the Pychron source repository.
    pub fork: String,
    /// Branch to check out.
    pub branch: String,
    /// Application identity namespacing the checkout and session files.
    pub app_id: String,
    /// Downstream application started by the launcher.
    pub app_name: String,
    /// EDM environment; `None` installs into the root EDM environment.
    pub edm_environment: Option<String>,
    /// MassSpec database schema version.
    pub massspec_db_version: String,
    /// Use the conda launcher variant on macOS.
    pub conda: bool,
    /// Launcher starts with the login dialog.
    pub use_login: bool,
    /// Launcher output path; relative paths resolve against the work dir.
    pub launcher_output: Option<PathBuf>,
    /// `git` binary.
    pub git: String,
    /// `edm` binary.
    pub edm: String,
}

impl ProvisionOptions {
    /// Defaults for `platform`.
    #[must_use]
    pub fn defaults_for(platform: &Platform) -> Self {
        Self {
            ngx: false,
            organization: settings::DEFAULT_ORGANIZATION.to_string(),
            fork: settings::DEFAULT_FORK.to_string(),
            branch: settings::DEFAULT_BRANCH.to_string(),
            app_id: settings::DEFAULT_APP_ID.to_string(),
            app_name: settings::DEFAULT_APP_NAME.to_string(),
            edm_environment: None,
            massspec_db_version: settings::DEFAULT_MASSSPEC_DB_VERSION.to_string(),
            conda: false,
            use_login: false,
            launcher_output: None,
            git: platform.default_git().to_string(),
            edm: settings::DEFAULT_EDM.to_string(),
        }
    }
}

/// Shared context for step execution.
///
/// Everything a step reads from the outside world (home directory, platform,
/// binaries, operator answers) is carried here explicitly.
pub struct Context {
    /// Home directory under which the environment and application roots live.
    pub home: PathBuf,
    /// Environment name; the environment root is `<home>/<env_name>`.
    pub env_name: String,
    /// Platform used for template and binary selection.
    pub platform: Platform,
    /// Resolved step options.
    pub options: ProvisionOptions,
    /// Directory relative launcher output paths resolve against.
    pub work_dir: PathBuf,
    /// Replace existing files without asking.
    pub overwrite: bool,
    /// Echo paths and rendered content.
    pub verbose: bool,
    /// Preview changes without applying.
    pub dry_run: bool,
    /// Logger for output and step recording.
    pub log: Arc<dyn Log>,
    /// Runs `git` and `edm`.
    pub executor: Arc<dyn Executor>,
    /// Answers overwrite and re-clone questions.
    pub confirm: Arc<dyn Confirm>,
    /// Embedded templates.
    pub templates: Arc<TemplateStore>,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("home", &self.home)
            .field("env_name", &self.env_name)
            .field("platform", &self.platform)
            .field("options", &self.options)
            .field("work_dir", &self.work_dir)
            .field("overwrite", &self.overwrite)
            .field("verbose", &self.verbose)
            .field("dry_run", &self.dry_run)
            .field("log", &"<dyn Log>")
            .field("executor", &"<dyn Executor>")
            .field("confirm", &"<dyn Confirm>")
            .field("templates", &self.templates)
            .finish()
    }
}

impl Context {
    /// Create a context with the embedded templates and all flags off.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded templates fail to load.
    pub fn new(
        home: PathBuf,
        env_name: &str,
        platform: Platform,
        options: ProvisionOptions,
        log: Arc<dyn Log>,
        executor: Arc<dyn Executor>,
        confirm: Arc<dyn Confirm>,
    ) -> Result<Self> {
        let templates = TemplateStore::embedded().context("loading embedded templates")?;
        Ok(Self {
            work_dir: home.clone(),
            home,
            env_name: env_name.to_string(),
            platform,
            options,
            overwrite: false,
            verbose: false,
            dry_run: false,
            log,
            executor,
            confirm,
            templates: Arc::new(templates),
        })
    }

    /// Set the overwrite, verbose and dry-run flags.
    #[must_use]
    pub const fn with_flags(mut self, overwrite: bool, verbose: bool, dry_run: bool) -> Self {
        self.overwrite = overwrite;
        self.verbose = verbose;
        self.dry_run = dry_run;
        self
    }

    /// Set the directory relative launcher paths resolve against.
    #[must_use]
    pub fn with_work_dir(mut self, work_dir: PathBuf) -> Self {
        self.work_dir = work_dir;
        self
    }

    /// `<home>/<env>`.
    #[must_use]
    pub fn env_root(&self) -> PathBuf {
        self.home.join(&self.env_name)
    }

    /// `<home>/.pychron.<app_id>`.
    #[must_use]
    pub fn app_root(&self) -> PathBuf {
        self.home.join(format!(".pychron.{}", self.options.app_id))
    }

    /// `<home>/.pychron.<app_id>/pychron`.
    #[must_use]
    pub fn checkout_dir(&self) -> PathBuf {
        self.app_root().join("pychron")
    }

    /// `<home>/.edm/envs`.
    #[must_use]
    pub fn edm_envs_root(&self) -> PathBuf {
        self.home.join(".edm").join("envs")
    }

    /// Build a materializer reflecting this context's flags.
    #[must_use]
    pub fn materializer(&self) -> FileMaterializer {
        FileMaterializer::new(Arc::clone(&self.confirm), Arc::clone(&self.log))
            .with_overwrite(self.overwrite)
            .with_verbose(self.verbose)
            .with_dry_run(self.dry_run)
    }

    /// Ensure `<base>/<segments...>` exists and return it.
    ///
    /// In dry-run mode the path is only computed and the creation logged.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created.
    pub fn ensure_dir(&self, base: &Path, segments: &[&str]) -> Result<PathBuf> {
        if self.dry_run {
            let path = segments.iter().fold(base.to_path_buf(), |acc, s| acc.join(s));
            if !path.is_dir() {
                self.log
                    .dry_run(&format!("would create directory {}", path.display()));
            }
            return Ok(path);
        }
        Ok(ensure_dir(base, segments)?)
    }

    /// Render template `name`.
    ///
    /// # Errors
    ///
    /// Returns [`PcmError::Template`] if the template is unknown or a
    /// placeholder is missing from `context`.
    pub fn render(&self, name: &str, context: &TemplateContext) -> Result<String, PcmError> {
        Ok(self.templates.render(name, context)?)
    }

    /// Render template `name` and materialize it as `<dir>/<name>`.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or writing fails.
    pub fn materialize(
        &self,
        dir: &Path,
        name: &str,
        context: &TemplateContext,
    ) -> Result<WriteResult> {
        let text = self.render(name, context)?;
        self.materializer().write(&dir.join(name), &text)
    }
}
