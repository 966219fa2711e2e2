//! Optional TOML settings file supplying defaults for CLI options.
//!
//! Lookup order: `--config PATH`, `$PCM_CONFIG`, then
//! `$XDG_CONFIG_HOME/pcm/config.toml` (default `~/.config/pcm/config.toml`).
//! A missing file yields empty settings; CLI flags always win.
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// Default environment directory name under the home directory.
pub const DEFAULT_ENV: &str = "Pychron";
/// Default GitHub organization used for data repositories.
pub const DEFAULT_ORGANIZATION: &str = "NMGRLData";
/// Default fork of the Pychron source repository.
pub const DEFAULT_FORK: &str = "PychronLabsLLC";
/// Default branch checked out by the code step.
pub const DEFAULT_BRANCH: &str = "main";
/// Default application identity.
pub const DEFAULT_APP_ID: &str = "0";
/// Default downstream application launched by the launcher.
pub const DEFAULT_APP_NAME: &str = "pycrunch";
/// Default MassSpec database schema version.
pub const DEFAULT_MASSSPEC_DB_VERSION: &str = "16";
/// EDM environment the launcher targets when none is configured.
pub const DEFAULT_EDM_ENVIRONMENT: &str = "pychron";
/// Default EDM binary.
pub const DEFAULT_EDM: &str = "edm";

/// Values read from the settings file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Environment name.
    pub env: Option<String>,
    /// GitHub organization for data repositories.
    pub organization: Option<String>,
    /// Fork of the pychron repository.
    pub fork: Option<String>,
    /// Branch to check out.
    pub branch: Option<String>,
    /// Application id.
    pub app_id: Option<String>,
    /// Application started by the launcher.
    pub app_name: Option<String>,
    /// EDM environment.
    pub edm_environment: Option<String>,
    /// MassSpec database version.
    pub massspec_db_version: Option<String>,
    /// Path or name of the `git` binary.
    pub git: Option<String>,
    /// Path or name of the `edm` binary.
    pub edm: Option<String>,
}

impl Settings {
    /// Load settings from `explicit` or the default location.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file exists but cannot be read and
    /// [`ConfigError::InvalidSyntax`] when it is not valid TOML.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = explicit.map(Path::to_path_buf).or_else(default_path);
        match path {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Parse settings from a specific file.
    ///
    /// # Errors
    ///
    /// See [`Settings::load`].
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::InvalidSyntax {
            file: path.display().to_string(),
            message: e.message().to_string(),
        })
    }
}

fn default_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("PCM_CONFIG") {
        return Some(PathBuf::from(path));
    }
    let config_dir = std::env::var("XDG_CONFIG_HOME").map_or_else(
        |_| {
            std::env::var("HOME")
                .or_else(|_| std::env::var("USERPROFILE"))
                .ok()
                .map(|home| PathBuf::from(home).join(".config"))
        },
        |dir| Some(PathBuf::from(dir)),
    )?;
    Some(config_dir.join("pcm").join("config.toml"))
}
