//! Command-line interface definitions.
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI entry point for the Pychron configuration manager.
#[derive(Parser, Debug)]
#[command(
    name = "pcm",
    about = "Provision a Pychron working environment",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Preview changes without applying
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,

    /// Answer yes to every confirmation prompt
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Overwrite existing files without asking
    #[arg(long, global = true)]
    pub overwrite: bool,

    /// Environment name (directory under the home directory)
    #[arg(short, long, global = true)]
    pub env: Option<String>,

    /// Override the home directory
    #[arg(long, global = true)]
    pub home: Option<PathBuf>,

    /// Settings file (default: ~/.config/pcm/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write the default and example pyscripts
    Scripts(HardwareOpts),
    /// Write the hardware setup files
    Setupfiles(HardwareOpts),
    /// Write initialization.xml and the preference files
    Init(InitOpts),
    /// Write the email credentials stub
    Email,
    /// Clone the Pychron source code
    Code(CodeOpts),
    /// Install the Python dependencies with EDM
    Edm(AppOpts),
    /// Generate the launcher script
    Launcher(LauncherOpts),
    /// Write the login session files
    Login(IdentityOpts),
    /// Run every step in order
    Wizard(WizardOpts),
    /// Print version information
    Version,
}

/// Hardware profile selection.
#[derive(Args, Debug, Clone, Default)]
pub struct HardwareOpts {
    /// Include NGX device files and preferences
    #[arg(long)]
    pub ngx: bool,
}

/// GitHub organization for data repositories.
#[derive(Args, Debug, Clone, Default)]
pub struct OrgOpts {
    /// GitHub organization
    #[arg(long)]
    pub org: Option<String>,
}

/// Source repository selection.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceOpts {
    /// Fork of the pychron repository
    #[arg(long)]
    pub fork: Option<String>,

    /// Branch to check out
    #[arg(long)]
    pub branch: Option<String>,
}

/// Application identity.
#[derive(Args, Debug, Clone, Default)]
pub struct IdentityOpts {
    /// Application id namespacing the checkout and session files
    #[arg(long)]
    pub app_id: Option<String>,
}

/// Package environment and downstream application.
#[derive(Args, Debug, Clone, Default)]
pub struct AppOpts {
    /// EDM environment
    #[arg(long)]
    pub environment: Option<String>,

    /// Application to launch (e.g. pycrunch, pyexperiment, pyvalve)
    #[arg(long)]
    pub app: Option<String>,
}

/// Launcher script options.
#[derive(Args, Debug, Clone, Default)]
pub struct LauncherFlags {
    /// Use the conda launcher variant
    #[arg(long)]
    pub conda: bool,

    /// Start with the login dialog
    #[arg(long)]
    pub login: bool,

    /// MassSpec database version
    #[arg(long)]
    pub msv: Option<String>,

    /// Launcher output path
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Options for the `init` subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct InitOpts {
    /// Hardware profile.
    #[command(flatten)]
    pub hardware: HardwareOpts,
    /// GitHub organization.
    #[command(flatten)]
    pub org: OrgOpts,
    /// Source repository.
    #[command(flatten)]
    pub source: SourceOpts,
    /// Application identity.
    #[command(flatten)]
    pub identity: IdentityOpts,
}

/// Options for the `code` subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct CodeOpts {
    /// Source repository.
    #[command(flatten)]
    pub source: SourceOpts,
    /// Application identity.
    #[command(flatten)]
    pub identity: IdentityOpts,
}

/// Options for the `launcher` subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct LauncherOpts {
    /// GitHub organization.
    #[command(flatten)]
    pub org: OrgOpts,
    /// Application identity.
    #[command(flatten)]
    pub identity: IdentityOpts,
    /// EDM environment and application.
    #[command(flatten)]
    pub app: AppOpts,
    /// Launcher script options.
    #[command(flatten)]
    pub launcher: LauncherFlags,
}

/// Options for the `wizard` subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct WizardOpts {
    /// Hardware profile.
    #[command(flatten)]
    pub hardware: HardwareOpts,
    /// GitHub organization.
    #[command(flatten)]
    pub org: OrgOpts,
    /// Source repository.
    #[command(flatten)]
    pub source: SourceOpts,
    /// Application identity.
    #[command(flatten)]
    pub identity: IdentityOpts,
    /// EDM environment and application.
    #[command(flatten)]
    pub app: AppOpts,
    /// Launcher script options.
    #[command(flatten)]
    pub launcher: LauncherFlags,
}

impl Command {
    /// Name used for the log file of this command.
    #[must_use]
    pub const fn log_name(&self) -> &'static str {
        match self {
            Self::Scripts(_) => "scripts",
            Self::Setupfiles(_) => "setupfiles",
            Self::Init(_) => "init",
            Self::Email => "email",
            Self::Code(_) => "code",
            Self::Edm(_) => "edm",
            Self::Launcher(_) => "launcher",
            Self::Login(_) => "login",
            Self::Wizard(_) => "wizard",
            Self::Version => "version",
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_scripts_with_ngx() {
        let cli = Cli::parse_from(["pcm", "scripts", "--ngx"]);
        assert!(matches!(cli.command, Command::Scripts(HardwareOpts { ngx: true })));
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["pcm", "setupfiles", "-e", "LabA", "--overwrite", "-v"]);
        assert_eq!(cli.global.env.as_deref(), Some("LabA"));
        assert!(cli.global.overwrite);
        assert!(cli.verbose);
    }

    #[test]
    fn parse_dry_run_short() {
        let cli = Cli::parse_from(["pcm", "-d", "email"]);
        assert!(cli.global.dry_run);
        assert!(matches!(cli.command, Command::Email));
    }

    #[test]
    fn parse_yes_short() {
        let cli = Cli::parse_from(["pcm", "-y", "code"]);
        assert!(cli.global.yes);
    }

    #[test]
    fn parse_code_options() {
        let cli = Cli::parse_from([
            "pcm", "code", "--fork", "NMGRL", "--branch", "develop", "--app-id", "2",
        ]);
        let Command::Code(opts) = cli.command else {
            panic!("expected code command");
        };
        assert_eq!(opts.source.fork.as_deref(), Some("NMGRL"));
        assert_eq!(opts.source.branch.as_deref(), Some("develop"));
        assert_eq!(opts.identity.app_id.as_deref(), Some("2"));
    }

    #[test]
    fn parse_launcher_options() {
        let cli = Cli::parse_from([
            "pcm",
            "launcher",
            "--conda",
            "--login",
            "--msv",
            "17",
            "--app",
            "pyexperiment",
            "--output",
            "/tmp/launch.sh",
        ]);
        let Command::Launcher(opts) = cli.command else {
            panic!("expected launcher command");
        };
        assert!(opts.launcher.conda);
        assert!(opts.launcher.login);
        assert_eq!(opts.launcher.msv.as_deref(), Some("17"));
        assert_eq!(opts.app.app.as_deref(), Some("pyexperiment"));
        assert_eq!(opts.launcher.output, Some(PathBuf::from("/tmp/launch.sh")));
    }

    #[test]
    fn parse_edm_environment() {
        let cli = Cli::parse_from(["pcm", "edm", "--environment", "pychron3", "--app", "pyvalve"]);
        let Command::Edm(opts) = cli.command else {
            panic!("expected edm command");
        };
        assert_eq!(opts.environment.as_deref(), Some("pychron3"));
        assert_eq!(opts.app.as_deref(), Some("pyvalve"));
    }

    #[test]
    fn parse_wizard_accepts_every_step_option() {
        let cli = Cli::parse_from([
            "pcm", "wizard", "--ngx", "--org", "LabOrg", "--fork", "me", "--app-id", "1",
            "--environment", "env", "--login",
        ]);
        let Command::Wizard(opts) = cli.command else {
            panic!("expected wizard command");
        };
        assert!(opts.hardware.ngx);
        assert_eq!(opts.org.org.as_deref(), Some("LabOrg"));
        assert!(opts.launcher.login);
    }

    #[test]
    fn ngx_is_rejected_where_it_does_not_apply() {
        assert!(Cli::try_parse_from(["pcm", "code", "--ngx"]).is_err());
    }

    #[test]
    fn parse_version() {
        let cli = Cli::parse_from(["pcm", "version"]);
        assert!(matches!(cli.command, Command::Version));
        assert_eq!(cli.command.log_name(), "version");
    }

    #[test]
    fn parse_home_and_config() {
        let cli = Cli::parse_from([
            "pcm",
            "--home",
            "/tmp/home",
            "--config",
            "/tmp/pcm.toml",
            "login",
        ]);
        assert_eq!(cli.global.home, Some(PathBuf::from("/tmp/home")));
        assert_eq!(cli.global.config, Some(PathBuf::from("/tmp/pcm.toml")));
    }
}
