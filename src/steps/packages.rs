//! Step: Python dependencies through EDM and pip.
use std::path::PathBuf;

use anyhow::{Context as _, Result};

use super::{Context, Step, StepResult};

/// Packages installed through EDM for every application.
pub const EDM_REQUIREMENTS: &[&str] = &[
    "apptools",
    "certifi",
    "chaco",
    "cython",
    "enable",
    "envisage",
    "gitpython",
    "jinja2",
    "keyring",
    "lxml",
    "matplotlib",
    "numpy",
    "openpyxl",
    "pandas",
    "patsy",
    "pillow",
    "pip",
    "pyface",
    "pygments",
    "pyparsing",
    "pyqt5",
    "python_dateutil",
    "pyyaml",
    "qt",
    "reportlab",
    "requests",
    "scikit_learn",
    "scipy",
    "sqlalchemy",
    "statsmodels",
    "traits",
    "traitsui",
    "xlrd",
    "xlsxwriter",
    "xlwt",
];

/// Packages installed with pip for every application.
pub const PIP_REQUIREMENTS: &[&str] = &["uncertainties", "qimage2ndarray", "pymysql"];

/// Application whose hardware stack needs serial and networking packages
/// from EDM instead of the analysis extras.
const PYVALVE_APP: &str = "pyvalve";

/// EDM and pip package lists for one application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirements {
    /// Installed with `edm install`.
    pub edm: Vec<&'static str>,
    /// Installed with `pip install --no-dependencies`.
    pub pip: Vec<&'static str>,
}

impl Requirements {
    /// Package lists for `app`.
    #[must_use]
    pub fn for_app(app: &str) -> Self {
        let mut edm = EDM_REQUIREMENTS.to_vec();
        let mut pip = PIP_REQUIREMENTS.to_vec();
        if app == PYVALVE_APP {
            edm.extend(["pyserial", "twisted"]);
        } else {
            pip.extend(["peakutils", "utm"]);
        }
        Self { edm, pip }
    }
}

/// Install the Python dependencies with EDM, then the pip-only extras into
/// the same interpreter.
#[derive(Debug)]
pub struct InstallPackages;

impl InstallPackages {
    /// Interpreter the pip extras are installed into.
    #[must_use]
    pub fn python_path(ctx: &Context) -> PathBuf {
        let edm_root = ctx.home.join(".edm");
        match &ctx.options.edm_environment {
            Some(env) => edm_root.join("envs").join(env).join("bin").join("python"),
            None => edm_root.join("bin").join("python"),
        }
    }
}

impl Step for InstallPackages {
    fn name(&self) -> &'static str {
        "Package install"
    }

    fn run(&self, ctx: &Context) -> Result<StepResult> {
        let req = Requirements::for_app(&ctx.options.app_name);
        let edm = ctx.options.edm.as_str();

        let mut edm_args = vec!["install", "-y"];
        edm_args.extend(req.edm.iter().copied());
        if let Some(env) = &ctx.options.edm_environment {
            edm_args.extend(["--environment", env.as_str()]);
        }

        let python = Self::python_path(ctx);
        let python_arg = python.to_string_lossy();
        let mut pip_args = vec!["-m", "pip", "install", "--no-dependencies"];
        pip_args.extend(req.pip.iter().copied());

        let edm_line = format!("{edm} {}", edm_args.join(" "));
        let pip_line = format!("{python_arg} {}", pip_args.join(" "));
        if ctx.verbose {
            ctx.log.info(&format!("requirements: {}", req.edm.join(" ")));
            ctx.log.info(&format!("command: {edm_line}"));
        }

        if ctx.dry_run {
            ctx.log.dry_run(&format!("would run: {edm_line}"));
            ctx.log.dry_run(&format!("would run: {pip_line}"));
            return Ok(StepResult::DryRun);
        }

        if !ctx.executor.which(edm) {
            anyhow::bail!("{edm} not found; install EDM or set `edm` in the settings file");
        }

        ctx.log.info(&format!("installing {} EDM packages", req.edm.len()));
        ctx.executor
            .run_streaming(edm, &edm_args)
            .context("installing EDM packages")?;

        ctx.log.info(&format!("installing {} pip packages", req.pip.len()));
        ctx.executor
            .run_streaming(&python_arg, &pip_args)
            .context("installing pip packages")?;

        Ok(StepResult::Ok)
    }
}
